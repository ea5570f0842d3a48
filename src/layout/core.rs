use std::rc::Rc;

use indexmap::IndexMap;
use slotmap::{SlotMap, new_key_type};

use crate::error::{LayoutError, Result};
use crate::geometry::{CellRect, FracRect, Insets, Rect};
use crate::host::{ContainerId, SharedBox};

use super::alignment::{Alignment, Axis};
use super::constraint::{Constraint, NodeVariant};
use super::grid::{GridModel, MAX_GRID_EXTENT};

new_key_type! {
    /// Opaque handle to a node in a [`LayoutTree`].
    pub struct NodeId;
}

/// Box wrapped by a leaf, plus the container it lived in when the leaf was made.
pub(crate) struct LeafState {
    pub(crate) handle: SharedBox,
    pub(crate) snapshot: Option<ContainerId>,
}

pub(crate) enum NodeKind {
    Leaf(LeafState),
    Horizontal(Vec<NodeId>),
    Vertical(Vec<NodeId>),
    Rect(IndexMap<NodeId, FracRect>),
    Grid {
        cells: IndexMap<NodeId, CellRect>,
        model: GridModel,
    },
}

pub(crate) struct NodeData {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) horizontal: Alignment,
    pub(crate) vertical: Alignment,
    pub(crate) hgap: Option<i32>,
    pub(crate) vgap: Option<i32>,
    pub(crate) border: Option<Insets>,
    pub(crate) debug: Option<bool>,
    /// Leaf children that noticed their box left the container behind our back.
    pub(crate) invalid: Vec<NodeId>,
    /// Destination rectangle of the most recent arrange.
    pub(crate) resolved: Option<Rect>,
    pub(crate) kind: NodeKind,
}

impl NodeData {
    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            parent: None,
            horizontal: Alignment::Stretched,
            vertical: Alignment::Stretched,
            hgap: None,
            vgap: None,
            border: None,
            debug: None,
            invalid: Vec::new(),
            resolved: None,
            kind,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

/// Arena holding every node of one layout tree.
///
/// Nodes are created unattached and linked with [`LayoutTree::add`]. A node has a
/// parent iff it sits in some container's children; removing a child frees its
/// whole subtree.
#[derive(Default)]
pub struct LayoutTree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    swept: Vec<NodeId>,
}

/// Direct children of a node, in placement order.
pub enum Children<'a> {
    Empty,
    List(std::slice::Iter<'a, NodeId>),
    Fractions(indexmap::map::Keys<'a, NodeId, FracRect>),
    Cells(indexmap::map::Keys<'a, NodeId, CellRect>),
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        match self {
            Children::Empty => None,
            Children::List(iter) => iter.next().copied(),
            Children::Fractions(iter) => iter.next().copied(),
            Children::Cells(iter) => iter.next().copied(),
        }
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unattached container node.
    pub fn create(&mut self, name: impl Into<String>, variant: NodeVariant) -> NodeId {
        let kind = match variant {
            NodeVariant::Horizontal => NodeKind::Horizontal(Vec::new()),
            NodeVariant::Vertical => NodeKind::Vertical(Vec::new()),
            NodeVariant::Rect => NodeKind::Rect(IndexMap::new()),
            NodeVariant::Grid => NodeKind::Grid {
                cells: IndexMap::new(),
                model: GridModel::new(),
            },
        };
        self.nodes.insert(NodeData::new(name.into(), kind))
    }

    /// Wrap `handle` in a new leaf and add it under `parent`.
    pub fn attach_box(
        &mut self,
        parent: NodeId,
        handle: SharedBox,
        constraint: Option<Constraint>,
    ) -> Result<NodeId> {
        let snapshot = handle.borrow().container();
        let leaf = self.nodes.insert(NodeData::new(
            String::new(),
            NodeKind::Leaf(LeafState { handle, snapshot }),
        ));
        if let Err(err) = self.add(parent, leaf, constraint) {
            self.nodes.remove(leaf);
            return Err(err);
        }
        Ok(leaf)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(NodeData::is_leaf)
    }

    /// Container flavour, `None` for leaves and removed nodes.
    pub fn variant(&self, id: NodeId) -> Option<NodeVariant> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Horizontal(_) => Some(NodeVariant::Horizontal),
            NodeKind::Vertical(_) => Some(NodeVariant::Vertical),
            NodeKind::Rect(_) => Some(NodeVariant::Rect),
            NodeKind::Grid { .. } => Some(NodeVariant::Grid),
        }
    }

    /// Box wrapped by a leaf.
    pub fn box_of(&self, id: NodeId) -> Option<SharedBox> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Leaf(leaf) => Some(Rc::clone(&leaf.handle)),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Horizontal(list)) | Some(NodeKind::Vertical(list)) => {
                Children::List(list.iter())
            }
            Some(NodeKind::Rect(map)) => Children::Fractions(map.keys()),
            Some(NodeKind::Grid { cells, .. }) => Children::Cells(cells.keys()),
            Some(NodeKind::Leaf(_)) | None => Children::Empty,
        }
    }

    /// Number of direct children; a leaf counts as one.
    pub fn count(&self, id: NodeId) -> usize {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Leaf(_)) => 1,
            Some(NodeKind::Horizontal(list)) | Some(NodeKind::Vertical(list)) => list.len(),
            Some(NodeKind::Rect(map)) => map.len(),
            Some(NodeKind::Grid { cells, .. }) => cells.len(),
            None => 0,
        }
    }

    /// Constraint `child` was added with, if `parent` is a rect or grid.
    pub fn constraint_of(&self, parent: NodeId, child: NodeId) -> Option<Constraint> {
        match &self.nodes.get(parent)?.kind {
            NodeKind::Rect(map) => map.get(&child).copied().map(Constraint::Fraction),
            NodeKind::Grid { cells, .. } => cells.get(&child).copied().map(Constraint::Cell),
            _ => None,
        }
    }

    /// Link `child` under `parent`.
    ///
    /// Re-adding a child to its current parent keeps its position; rect and grid
    /// parents take the new constraint. A child owned by another parent must be
    /// removed there first.
    pub fn add(
        &mut self,
        parent: NodeId,
        child: NodeId,
        constraint: Option<Constraint>,
    ) -> Result<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(LayoutError::StaleNode);
        }
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            return Err(LayoutError::Cycle);
        }
        let current = self.nodes[child].parent;
        if current.is_some_and(|owner| owner != parent) {
            return Err(LayoutError::AlreadyAttached);
        }
        let already_linked = current == Some(parent);

        let node = &mut self.nodes[parent];
        match &mut node.kind {
            NodeKind::Leaf(_) => return Err(LayoutError::NotAContainer(node.name.clone())),
            NodeKind::Horizontal(list) | NodeKind::Vertical(list) => {
                if !already_linked {
                    list.push(child);
                }
            }
            NodeKind::Rect(map) => {
                let fraction = match constraint {
                    None => FracRect::UNIT,
                    Some(Constraint::Fraction(fraction)) => fraction,
                    Some(Constraint::Cell(_)) => {
                        return Err(LayoutError::WrongConstraint(node.name.clone()));
                    }
                };
                if let Some(value) = fraction.out_of_range() {
                    return Err(LayoutError::FractionOutOfRange(value));
                }
                map.insert(child, fraction);
            }
            NodeKind::Grid { cells, .. } => {
                let cell = match constraint {
                    Some(Constraint::Cell(cell)) => cell,
                    None => return Err(LayoutError::MissingCellConstraint(node.name.clone())),
                    Some(Constraint::Fraction(_)) => {
                        return Err(LayoutError::WrongConstraint(node.name.clone()));
                    }
                };
                let within = |start: i32, extent: i32| {
                    start
                        .checked_add(extent)
                        .is_some_and(|edge| edge <= MAX_GRID_EXTENT)
                };
                let fits = within(cell.x, cell.width) && within(cell.y, cell.height);
                if cell.x < 0 || cell.y < 0 || cell.width < 1 || cell.height < 1 || !fits {
                    return Err(LayoutError::InvalidCell(cell));
                }
                cells.insert(child, cell);
            }
        }
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Unlink `child` from `parent` and free its subtree.
    ///
    /// Returns every freed id, `child` first. Nothing happens when `child` is not
    /// a direct child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Vec<NodeId> {
        if self.parent(child) != Some(parent) {
            return Vec::new();
        }
        let node = &mut self.nodes[parent];
        match &mut node.kind {
            NodeKind::Horizontal(list) | NodeKind::Vertical(list) => list.retain(|id| *id != child),
            NodeKind::Rect(map) => {
                map.shift_remove(&child);
            }
            NodeKind::Grid { cells, .. } => {
                cells.shift_remove(&child);
            }
            NodeKind::Leaf(_) => {}
        }
        node.invalid.retain(|id| *id != child);

        let freed = self.descendants(child);
        for id in &freed {
            self.nodes.remove(*id);
        }
        freed
    }

    /// Free a node that has no parent, with its subtree.
    ///
    /// Attached nodes must go through [`LayoutTree::remove`]; they are left alone.
    pub fn free(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) || self.parent(id).is_some() {
            return Vec::new();
        }
        let freed = self.descendants(id);
        for node in &freed {
            self.nodes.remove(*node);
        }
        freed
    }

    /// Walk from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Pre-order list of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            let children: Vec<NodeId> = self.children(current).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Depth-first search for a container named `name`, starting at `from`.
    pub fn find_node(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(from)
            .into_iter()
            .find(|id| !self.is_leaf(*id) && self.name(*id) == Some(name))
    }

    /// Every box below `id`, in placement order.
    pub fn boxes(&self, id: NodeId) -> Vec<SharedBox> {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| self.box_of(node))
            .collect()
    }

    pub fn horizontal_alignment(&self, id: NodeId) -> Option<Alignment> {
        self.nodes.get(id).map(|node| node.horizontal)
    }

    pub fn vertical_alignment(&self, id: NodeId) -> Option<Alignment> {
        self.nodes.get(id).map(|node| node.vertical)
    }

    /// Fails without touching the node when `alignment` is a vertical value.
    pub fn set_horizontal_alignment(&mut self, id: NodeId, alignment: Alignment) -> Result<()> {
        let alignment = alignment.check(Axis::Horizontal)?;
        self.node_mut(id)?.horizontal = alignment;
        Ok(())
    }

    /// Fails without touching the node when `alignment` is a horizontal value.
    pub fn set_vertical_alignment(&mut self, id: NodeId, alignment: Alignment) -> Result<()> {
        let alignment = alignment.check(Axis::Vertical)?;
        self.node_mut(id)?.vertical = alignment;
        Ok(())
    }

    pub fn set_hgap(&mut self, id: NodeId, hgap: i32) -> Result<()> {
        self.node_mut(id)?.hgap = Some(hgap);
        Ok(())
    }

    pub fn set_vgap(&mut self, id: NodeId, vgap: i32) -> Result<()> {
        self.node_mut(id)?.vgap = Some(vgap);
        Ok(())
    }

    /// Forget explicit gaps so both are inherited again.
    pub fn clear_gaps(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.hgap = None;
        node.vgap = None;
        Ok(())
    }

    /// Horizontal gap, inherited from the nearest ancestor that sets one.
    pub fn hgap(&self, id: NodeId) -> i32 {
        self.inherited(id, |node| node.hgap).unwrap_or(0)
    }

    pub fn vgap(&self, id: NodeId) -> i32 {
        self.inherited(id, |node| node.vgap).unwrap_or(0)
    }

    pub fn set_border(&mut self, id: NodeId, border: Option<Insets>) -> Result<()> {
        self.node_mut(id)?.border = border;
        Ok(())
    }

    pub fn border(&self, id: NodeId) -> Insets {
        self.nodes
            .get(id)
            .and_then(|node| node.border)
            .unwrap_or(Insets::ZERO)
    }

    pub fn set_debug(&mut self, id: NodeId, debug: Option<bool>) -> Result<()> {
        self.node_mut(id)?.debug = debug;
        Ok(())
    }

    /// Debug flag, inherited like gaps.
    pub fn is_debug(&self, id: NodeId) -> bool {
        self.inherited(id, |node| node.debug).unwrap_or(false)
    }

    /// Destination of the node's most recent arrange.
    pub fn resolved_rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).and_then(|node| node.resolved)
    }

    pub fn grid_model(&self, id: NodeId) -> Option<&GridModel> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Grid { model, .. } => Some(model),
            _ => None,
        }
    }

    pub fn grid_model_mut(&mut self, id: NodeId) -> Option<&mut GridModel> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Grid { model, .. } => Some(model),
            _ => None,
        }
    }

    /// Cell extent of a grid: union of its children's cells, always including
    /// the origin. `None` when `id` is not a grid.
    pub fn grid_bounds(&self, id: NodeId) -> Option<CellRect> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Grid { cells, .. } => Some(cell_bounds(cells.values())),
            _ => None,
        }
    }

    /// Leaves waiting for removal under `id`.
    pub fn pending_invalid(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.invalid.as_slice())
            .unwrap_or(&[])
    }

    /// Drop leaf children whose boxes were moved out of their container.
    ///
    /// Direct leaf children are probed first, so a box moved since the previous
    /// pass is caught here rather than one pass later.
    pub fn remove_invalid_nodes(&mut self, id: NodeId) {
        let leaves: Vec<NodeId> = self.children(id).filter(|c| self.is_leaf(*c)).collect();
        for leaf in leaves {
            if self.leaf_drifted(leaf) {
                self.flag_invalid(leaf);
            }
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let pending = std::mem::take(&mut node.invalid);
        for leaf in pending {
            let freed = self.remove(id, leaf);
            self.swept.extend(freed);
        }
    }

    /// Hand over ids freed by invalid-leaf sweeps since the last call.
    pub fn take_swept(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.swept)
    }

    /// Indented outline of the subtree, four spaces per level.
    pub fn describe(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.describe_into(id, 0, &mut out);
        out
    }

    fn describe_into(&self, id: NodeId, level: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let label = match &node.kind {
            NodeKind::Leaf(leaf) => {
                let size = leaf.handle.borrow().preferred_size();
                format!("leaf {}x{}", size.width, size.height)
            }
            NodeKind::Horizontal(_) => format!("{} (horizontal)", node.name),
            NodeKind::Vertical(_) => format!("{} (vertical)", node.name),
            NodeKind::Rect(_) => format!("{} (rect)", node.name),
            NodeKind::Grid { .. } => format!("{} (grid)", node.name),
        };
        out.push_str(&" ".repeat(level));
        out.push_str(&label);
        out.push('\n');
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.describe_into(child, level + 4, out);
        }
    }

    /// True when the leaf's box now reports a different container than the one
    /// it had when wrapped. A leaf made before its box had a container adopts
    /// the first one it sees.
    pub(crate) fn leaf_drifted(&mut self, id: NodeId) -> bool {
        let Some(NodeKind::Leaf(leaf)) = self.nodes.get_mut(id).map(|node| &mut node.kind) else {
            return false;
        };
        let live = leaf.handle.borrow().container();
        match leaf.snapshot {
            None => {
                leaf.snapshot = live;
                false
            }
            Some(snapshot) => live != Some(snapshot),
        }
    }

    /// Queue a leaf for removal at its parent's next arrange.
    pub(crate) fn flag_invalid(&mut self, leaf: NodeId) {
        let Some(parent) = self.parent(leaf) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            if !node.invalid.contains(&leaf) {
                node.invalid.push(leaf);
            }
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(LayoutError::StaleNode)
    }

    fn inherited<T>(&self, id: NodeId, read: impl Fn(&NodeData) -> Option<T>) -> Option<T> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find_map(|current| self.nodes.get(current).and_then(&read))
    }
}

pub(crate) fn cell_bounds<'a>(cells: impl IntoIterator<Item = &'a CellRect>) -> CellRect {
    cells
        .into_iter()
        .fold(CellRect::default(), |acc, cell| acc.union(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticBox;

    fn leaf_box(width: i32, height: i32) -> SharedBox {
        StaticBox::new(width, height)
            .in_container(ContainerId(1))
            .shared()
    }

    #[test]
    fn add_sets_parent_and_keeps_order() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Horizontal);
        let a = tree.create("a", NodeVariant::Vertical);
        let b = tree.create("b", NodeVariant::Vertical);
        tree.add(root, a, None).unwrap();
        tree.add(root, b, None).unwrap();
        tree.add(root, a, None).unwrap();

        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn add_rejects_cycles_and_reparenting() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        let left = tree.create("left", NodeVariant::Vertical);
        let right = tree.create("right", NodeVariant::Vertical);
        tree.add(root, left, None).unwrap();
        tree.add(root, right, None).unwrap();

        assert!(matches!(tree.add(left, root, None), Err(LayoutError::Cycle)));
        assert!(matches!(tree.add(left, left, None), Err(LayoutError::Cycle)));
        assert!(matches!(
            tree.add(left, right, None),
            Err(LayoutError::AlreadyAttached)
        ));
    }

    #[test]
    fn grid_requires_cell_constraint() {
        let mut tree = LayoutTree::new();
        let grid = tree.create("grid", NodeVariant::Grid);
        let child = tree.create("child", NodeVariant::Vertical);

        assert!(matches!(
            tree.add(grid, child, None),
            Err(LayoutError::MissingCellConstraint(name)) if name == "grid"
        ));
        assert!(matches!(
            tree.add(grid, child, Some(Constraint::cell(0, 0, 0, 1))),
            Err(LayoutError::InvalidCell(_))
        ));
        assert!(tree.parent(child).is_none());

        tree.add(grid, child, Some(Constraint::cell(1, 0, 2, 1))).unwrap();
        assert_eq!(
            tree.constraint_of(grid, child),
            Some(Constraint::cell(1, 0, 2, 1))
        );
    }

    #[test]
    fn grid_rejects_cells_past_the_extent_limit() {
        let mut tree = LayoutTree::new();
        let grid = tree.create("grid", NodeVariant::Grid);
        let child = tree.create("child", NodeVariant::Vertical);

        for cell in [
            Constraint::cell(i32::MAX, 0, 1, 1),
            Constraint::cell(0, 1, 1, i32::MAX),
            Constraint::cell(MAX_GRID_EXTENT, 0, 1, 1),
        ] {
            assert!(matches!(
                tree.add(grid, child, Some(cell)),
                Err(LayoutError::InvalidCell(_))
            ));
        }
        assert!(tree.parent(child).is_none());

        tree.add(grid, child, Some(Constraint::cell(MAX_GRID_EXTENT - 1, 0, 1, 1)))
            .unwrap();
        assert_eq!(tree.grid_bounds(grid).map(|bounds| bounds.width), Some(MAX_GRID_EXTENT));
    }

    #[test]
    fn rect_defaults_to_unit_and_validates_range() {
        let mut tree = LayoutTree::new();
        let rect = tree.create("rect", NodeVariant::Rect);
        let a = tree.create("a", NodeVariant::Vertical);
        let b = tree.create("b", NodeVariant::Vertical);

        tree.add(rect, a, None).unwrap();
        assert_eq!(
            tree.constraint_of(rect, a),
            Some(Constraint::Fraction(FracRect::UNIT))
        );
        assert!(matches!(
            tree.add(rect, b, Some(Constraint::fraction(0.5, 0.0, 0.75, 1.0))),
            Err(LayoutError::FractionOutOfRange(_))
        ));
    }

    #[test]
    fn failed_attach_does_not_leak_leaf() {
        let mut tree = LayoutTree::new();
        let grid = tree.create("grid", NodeVariant::Grid);
        assert!(tree.attach_box(grid, leaf_box(1, 1), None).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_frees_subtree() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        let column = tree.create("column", NodeVariant::Vertical);
        tree.add(root, column, None).unwrap();
        let leaf = tree.attach_box(column, leaf_box(3, 3), None).unwrap();

        let freed = tree.remove(root, column);
        assert_eq!(freed, vec![column, leaf]);
        assert!(!tree.contains(leaf));
        assert_eq!(tree.count(root), 0);
    }

    #[test]
    fn free_only_touches_detached_nodes() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        let attached = tree.create("attached", NodeVariant::Vertical);
        tree.add(root, attached, None).unwrap();
        let loose = tree.create("loose", NodeVariant::Horizontal);
        let leaf = tree.attach_box(loose, leaf_box(1, 1), None).unwrap();

        assert!(tree.free(attached).is_empty());
        assert_eq!(tree.free(loose), vec![loose, leaf]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn gaps_and_debug_inherit_from_ancestors() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        let inner = tree.create("inner", NodeVariant::Horizontal);
        tree.add(root, inner, None).unwrap();
        let leaf = tree.attach_box(inner, leaf_box(1, 1), None).unwrap();

        assert_eq!(tree.hgap(leaf), 0);
        tree.set_hgap(root, 4).unwrap();
        tree.set_vgap(inner, 2).unwrap();
        tree.set_debug(root, Some(true)).unwrap();
        assert_eq!(tree.hgap(leaf), 4);
        assert_eq!(tree.vgap(leaf), 2);
        assert_eq!(tree.vgap(root), 0);
        assert!(tree.is_debug(leaf));
    }

    #[test]
    fn find_node_skips_leaves() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        let grid = tree.create("grid", NodeVariant::Grid);
        tree.add(root, grid, None).unwrap();
        tree.attach_box(root, leaf_box(1, 1), None).unwrap();

        assert_eq!(tree.find_node(root, "grid"), Some(grid));
        assert_eq!(tree.find_node(root, ""), None);
        assert_eq!(tree.find_node(root, "missing"), None);
    }

    #[test]
    fn illegal_alignment_leaves_value_unchanged() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        tree.set_horizontal_alignment(root, Alignment::Right).unwrap();

        let err = tree.set_horizontal_alignment(root, Alignment::Top);
        assert!(matches!(err, Err(LayoutError::IllegalAlignment { .. })));
        assert_eq!(tree.horizontal_alignment(root), Some(Alignment::Right));
    }

    #[test]
    fn grid_bounds_include_origin() {
        let mut tree = LayoutTree::new();
        let grid = tree.create("grid", NodeVariant::Grid);
        tree.attach_box(grid, leaf_box(1, 1), Some(Constraint::cell(2, 1, 2, 1)))
            .unwrap();
        assert_eq!(tree.grid_bounds(grid), Some(CellRect::new(0, 0, 4, 2)));
    }

    #[test]
    fn describe_indents_children() {
        let mut tree = LayoutTree::new();
        let root = tree.create("root", NodeVariant::Vertical);
        tree.attach_box(root, leaf_box(5, 2), None).unwrap();
        assert_eq!(tree.describe(root), "root (vertical)\n    leaf 5x2\n");
    }
}
