use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::Instant;

use serde_json::Value;

use crate::config::CoordinatorConfig;
use crate::debug::{Outline, OutlinePainter, RepaintClock};
use crate::error::{LayoutError, Result};
use crate::geometry::{Insets, Rect, Size};
use crate::host::{BoxKey, HostContainer, SharedBox};
use crate::layout::{Alignment, Constraint, GridModel, LayoutTree, NodeId, NodeVariant};
use crate::logging::{LogLevel, event_with_fields, json_kv, json_str};
use crate::metrics::{LayoutMetrics, MetricSnapshot};

/// Target used for sweep and structure events.
pub const TREE_TARGET: &str = "node_layout::tree";

/// Node addressed either by container name or by the box a leaf wraps.
#[derive(Clone, Copy)]
pub enum NodeRef<'a> {
    Name(&'a str),
    Box(&'a SharedBox),
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(value: &'a str) -> Self {
        NodeRef::Name(value)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(value: &'a String) -> Self {
        NodeRef::Name(value.as_str())
    }
}

impl<'a> From<&'a SharedBox> for NodeRef<'a> {
    fn from(value: &'a SharedBox) -> Self {
        NodeRef::Box(value)
    }
}

impl NodeRef<'_> {
    fn describe(&self) -> String {
        match self {
            NodeRef::Name(name) => (*name).to_string(),
            NodeRef::Box(handle) => format!("{:?}", BoxKey::of(handle)),
        }
    }
}

/// Owns a layout tree and the registries that let hosts address it by name
/// or by box.
///
/// Configuration mistakes (unknown names, alignments on the wrong axis) are
/// logged as warnings and leave the tree untouched. Only malformed grid
/// placements and unresolvable attach targets come back as errors.
pub struct LayoutCoordinator {
    tree: LayoutTree,
    root: NodeId,
    nodes: HashMap<String, NodeId>,
    leaves: HashMap<BoxKey, NodeId>,
    config: CoordinatorConfig,
    metrics: LayoutMetrics,
    repaint: RepaintClock,
}

impl LayoutCoordinator {
    pub fn new(root_name: impl Into<String>, variant: NodeVariant) -> Self {
        Self::with_config(root_name, variant, CoordinatorConfig::default())
    }

    pub fn with_config(
        root_name: impl Into<String>,
        variant: NodeVariant,
        config: CoordinatorConfig,
    ) -> Self {
        let repaint = RepaintClock::new(config.debug_repaint_interval);
        let mut coordinator = Self {
            tree: LayoutTree::new(),
            root: NodeId::default(),
            nodes: HashMap::new(),
            leaves: HashMap::new(),
            config,
            metrics: LayoutMetrics::new(),
            repaint,
        };
        let name = root_name.into();
        let root = coordinator.create_node(name.clone(), variant);
        coordinator.root = root;
        coordinator.nodes.insert(name, root);
        if coordinator.config.debug {
            let _ = coordinator.tree.set_debug(root, Some(true));
        }
        coordinator
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Direct tree access. Nodes linked this way become addressable by name
    /// after [`LayoutCoordinator::sync_nodes`] or on first lookup.
    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Create an unattached container, applying the configured grid defaults.
    pub fn create_node(&mut self, name: impl Into<String>, variant: NodeVariant) -> NodeId {
        let id = self.tree.create(name, variant);
        if let Some(model) = self.tree.grid_model_mut(id) {
            model.set_default_min(self.config.grid_default_min);
            model.set_default_max(self.config.grid_default_max);
        }
        id
    }

    /// Register `id` under its name and, when `parent_name` is given, add it to
    /// that parent.
    ///
    /// An unknown parent is a warning: the node stays registered but detached.
    pub fn register_node(
        &mut self,
        id: NodeId,
        parent_name: Option<&str>,
        constraint: Option<Constraint>,
    ) -> Result<()> {
        let name = self.tree.name(id).ok_or(LayoutError::StaleNode)?.to_string();
        let Some(parent_name) = parent_name else {
            self.put_node(name, id);
            return Ok(());
        };
        let Some(parent) = self.resolve(parent_name) else {
            self.warn(
                "parent_not_found",
                [json_str("node", name.clone()), json_str("parent", parent_name)],
            );
            self.put_node(name, id);
            return Ok(());
        };
        self.tree.add(parent, id, constraint)?;
        self.put_node(name, id);
        Ok(())
    }

    /// Create, register and link a container in one call.
    ///
    /// The node is discarded again when the parent rejects it.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        variant: NodeVariant,
        parent_name: Option<&str>,
        constraint: Option<Constraint>,
    ) -> Result<NodeId> {
        let id = self.create_node(name, variant);
        if let Err(err) = self.register_node(id, parent_name, constraint) {
            self.tree.free(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Wrap `handle` in a leaf under the container named `node_name`.
    ///
    /// A box that is already attached moves: its old leaf is removed once the
    /// new one is in place. A rejected attach leaves the box where it was.
    /// Returns the new leaf.
    pub fn attach(
        &mut self,
        handle: &SharedBox,
        node_name: &str,
        constraint: Option<Constraint>,
    ) -> Result<NodeId> {
        let Some(node) = self.resolve(node_name) else {
            self.warn("node_not_found", [json_str("node", node_name)]);
            return Err(LayoutError::NodeNotFound(node_name.to_string()));
        };
        let previous_container = handle.borrow().container();
        if let Some(target) = self.config.target {
            handle.borrow_mut().set_container(Some(target));
        }

        match self.tree.attach_box(node, Rc::clone(handle), constraint) {
            Ok(leaf) => {
                self.detach(handle);
                self.leaves.insert(BoxKey::of(handle), leaf);
                if self.config.metrics_enabled {
                    self.metrics.record_attach();
                }
                Ok(leaf)
            }
            Err(err) => {
                handle.borrow_mut().set_container(previous_container);
                self.warn(
                    "attach_failed",
                    [json_str("node", node_name), json_str("error", err.to_string())],
                );
                Err(err)
            }
        }
    }

    /// Remove the leaf wrapping `handle`. False when the box is not attached.
    pub fn detach(&mut self, handle: &SharedBox) -> bool {
        let Some(leaf) = self.leaves.remove(&BoxKey::of(handle)) else {
            return false;
        };
        let removed = match self.tree.parent(leaf) {
            Some(parent) => !self.tree.remove(parent, leaf).is_empty(),
            None => !self.tree.free(leaf).is_empty(),
        };
        if removed && self.config.metrics_enabled {
            self.metrics.record_detach();
        }
        removed
    }

    pub fn set_horizontal_alignment<'a>(
        &mut self,
        target: impl Into<NodeRef<'a>>,
        alignment: Alignment,
    ) -> bool {
        let target = target.into();
        self.apply(target, "horizontal_alignment", |tree, id| {
            tree.set_horizontal_alignment(id, alignment)
        })
    }

    pub fn set_vertical_alignment<'a>(
        &mut self,
        target: impl Into<NodeRef<'a>>,
        alignment: Alignment,
    ) -> bool {
        let target = target.into();
        self.apply(target, "vertical_alignment", |tree, id| {
            tree.set_vertical_alignment(id, alignment)
        })
    }

    pub fn set_hgap<'a>(&mut self, target: impl Into<NodeRef<'a>>, hgap: i32) -> bool {
        let target = target.into();
        self.apply(target, "hgap", |tree, id| tree.set_hgap(id, hgap))
    }

    pub fn set_vgap<'a>(&mut self, target: impl Into<NodeRef<'a>>, vgap: i32) -> bool {
        let target = target.into();
        self.apply(target, "vgap", |tree, id| tree.set_vgap(id, vgap))
    }

    pub fn set_border<'a>(
        &mut self,
        target: impl Into<NodeRef<'a>>,
        border: Option<Insets>,
    ) -> bool {
        let target = target.into();
        self.apply(target, "border", |tree, id| tree.set_border(id, border))
    }

    /// Preferred size of the whole tree inside a container with `insets`.
    pub fn preferred_size(&mut self, insets: Insets) -> Size {
        if self.config.metrics_enabled {
            self.metrics.record_measure();
        }
        let root = self.root;
        let size = self.tree.preferred_size(root);
        Size::new(
            size.width + insets.horizontal() + self.tree.hgap(root),
            size.height + insets.vertical() + self.tree.vgap(root),
        )
    }

    /// Lay the tree out inside a container of `bounds` with `insets`.
    ///
    /// The root lands at `(insets.left, insets.top)`, in container coordinates,
    /// shrunk by the insets and the root gaps.
    pub fn arrange(&mut self, bounds: Rect, insets: Insets) {
        let root = self.root;
        let dest = Rect::new(
            insets.left,
            insets.top,
            bounds.width - insets.horizontal() - self.tree.hgap(root),
            bounds.height - insets.vertical() - self.tree.vgap(root),
        );
        self.tree.layout(root, dest);
        if self.config.metrics_enabled {
            self.metrics.record_arrange();
        }
        self.prune_swept();
    }

    pub fn layout_container(&mut self, container: &dyn HostContainer) {
        self.arrange(container.bounds(), container.insets());
    }

    /// Register containers and leaves that were linked through the tree directly.
    pub fn sync_nodes(&mut self) {
        for id in self.tree.descendants(self.root) {
            if id == self.root {
                continue;
            }
            match self.tree.box_of(id) {
                Some(handle) => {
                    self.leaves.insert(BoxKey::of(&handle), id);
                }
                None => {
                    if let Some(name) = self.tree.name(id).map(str::to_string) {
                        if self.nodes.get(&name) != Some(&id) {
                            self.put_node(name, id);
                        }
                    }
                }
            }
        }
    }

    /// Check that every container below the root owns its name in the registry.
    pub fn verify(&self) -> Result<()> {
        for id in self.tree.descendants(self.root) {
            if id == self.root || self.tree.is_leaf(id) {
                continue;
            }
            let name = self.tree.name(id).unwrap_or_default();
            if self.nodes.get(name) != Some(&id) {
                return Err(LayoutError::RegistryMismatch(name.to_string()));
            }
        }
        Ok(())
    }

    /// Container named `name`, from the registry or by searching the tree.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .get(name)
            .copied()
            .filter(|id| self.tree.contains(*id))
            .or_else(|| self.tree.find_node(self.root, name))
    }

    /// Leaf wrapping `handle`, if it is still attached.
    pub fn node_for_box(&self, handle: &SharedBox) -> Option<NodeId> {
        let leaf = self.leaves.get(&BoxKey::of(handle)).copied()?;
        let current = self.tree.box_of(leaf)?;
        (BoxKey::of(&current) == BoxKey::of(handle)).then_some(leaf)
    }

    /// Toggle outlines for the whole tree. Nodes with their own flag keep it.
    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
        let _ = self.tree.set_debug(self.root, Some(debug));
        self.repaint.reset();
    }

    /// Last arranged rectangle of every debug-flagged container, in tree order.
    pub fn debug_outlines(&self) -> Vec<Outline> {
        self.tree
            .descendants(self.root)
            .into_iter()
            .filter(|id| !self.tree.is_leaf(*id) && self.tree.is_debug(*id))
            .filter_map(|id| {
                let rect = self.tree.resolved_rect(id)?;
                let name = self.tree.name(id)?.to_string();
                Some(Outline { name, rect })
            })
            .collect()
    }

    /// Paint outlines when a repaint is due at `now`. Returns whether it painted.
    pub fn paint_debug(
        &mut self,
        painter: &OutlinePainter,
        writer: &mut impl Write,
        now: Instant,
    ) -> Result<bool> {
        let outlines = self.debug_outlines();
        if outlines.is_empty() || !self.repaint.due(now) {
            return Ok(false);
        }
        painter.paint(writer, &outlines)?;
        Ok(true)
    }

    pub fn describe(&self) -> String {
        self.tree.describe(self.root)
    }

    /// Counters so far, when metrics are enabled.
    pub fn metrics(&self) -> Option<MetricSnapshot> {
        self.config
            .metrics_enabled
            .then(|| self.metrics.snapshot())
    }

    /// Log a metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) -> Result<()> {
        let (Some(snapshot), Some(logger)) = (self.metrics(), self.config.logger.as_ref()) else {
            return Ok(());
        };
        logger.log_event(snapshot.to_log_event(&self.config.metrics_target))?;
        Ok(())
    }

    pub fn set_column_min_width(&mut self, grid: &str, column: usize, value: i32) -> Result<()> {
        self.with_grid(grid, |model| model.set_min_width(column, value))
    }

    pub fn set_column_max_width(&mut self, grid: &str, column: usize, value: i32) -> Result<()> {
        self.with_grid(grid, |model| model.set_max_width(column, value))
    }

    pub fn set_row_min_height(&mut self, grid: &str, row: usize, value: i32) -> Result<()> {
        self.with_grid(grid, |model| model.set_min_height(row, value))
    }

    pub fn set_row_max_height(&mut self, grid: &str, row: usize, value: i32) -> Result<()> {
        self.with_grid(grid, |model| model.set_max_height(row, value))
    }

    /// Resolve a grid by name for callers that build on its cell space.
    pub(crate) fn resolve_grid(&mut self, name: &str) -> Result<NodeId> {
        let id = self
            .resolve(name)
            .ok_or_else(|| LayoutError::NodeNotFound(name.to_string()))?;
        match self.tree.variant(id) {
            Some(NodeVariant::Grid) => Ok(id),
            _ => Err(LayoutError::NotAGrid(name.to_string())),
        }
    }

    fn with_grid(
        &mut self,
        name: &str,
        update: impl FnOnce(&mut GridModel),
    ) -> Result<()> {
        let id = self.resolve_grid(name)?;
        let model = self
            .tree
            .grid_model_mut(id)
            .ok_or_else(|| LayoutError::NotAGrid(name.to_string()))?;
        update(model);
        Ok(())
    }

    /// Registry lookup with a tree search fallback that caches its hit.
    fn resolve(&mut self, name: &str) -> Option<NodeId> {
        if let Some(id) = self.nodes.get(name).copied() {
            if self.tree.contains(id) {
                return Some(id);
            }
            self.nodes.remove(name);
        }
        let found = self.tree.find_node(self.root, name)?;
        self.nodes.insert(name.to_string(), found);
        Some(found)
    }

    fn resolve_ref(&mut self, target: NodeRef<'_>) -> Option<NodeId> {
        match target {
            NodeRef::Name(name) => self.resolve(name),
            NodeRef::Box(handle) => self.node_for_box(handle),
        }
    }

    fn apply(
        &mut self,
        target: NodeRef<'_>,
        property: &str,
        update: impl FnOnce(&mut LayoutTree, NodeId) -> Result<()>,
    ) -> bool {
        let Some(id) = self.resolve_ref(target) else {
            self.warn(
                "node_not_found",
                [json_str("node", target.describe()), json_str("property", property)],
            );
            return false;
        };
        match update(&mut self.tree, id) {
            Ok(()) => true,
            Err(err) => {
                self.warn(
                    "setter_rejected",
                    [
                        json_str("node", target.describe()),
                        json_str("property", property),
                        json_str("error", err.to_string()),
                    ],
                );
                false
            }
        }
    }

    fn put_node(&mut self, name: String, id: NodeId) {
        if let Some(previous) = self.nodes.get(&name).copied() {
            if previous != id {
                self.warn("duplicate_node_name", [json_str("node", name.clone())]);
            }
        }
        self.nodes.insert(name, id);
    }

    fn prune_swept(&mut self) {
        let swept = self.tree.take_swept();
        if swept.is_empty() {
            return;
        }
        self.leaves.retain(|_, leaf| !swept.contains(leaf));
        if self.config.metrics_enabled {
            self.metrics.record_swept(swept.len());
        }
        self.log(
            LogLevel::Debug,
            TREE_TARGET,
            "invalid_leaves_swept",
            [json_kv("count", swept.len())],
        );
    }

    fn warn(&mut self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if self.config.metrics_enabled {
            self.metrics.record_warning();
        }
        let target = self.config.log_target.clone();
        self.log(LogLevel::Warn, &target, message, fields);
    }

    fn log(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(event_with_fields(level, target, message, fields));
        }
    }
}
