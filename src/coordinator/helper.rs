use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{LayoutError, Result};
use crate::host::{BoxKey, SharedBox, StaticBox};
use crate::layout::{Constraint, LayoutTree, NodeId};

use super::core::LayoutCoordinator;

/// Something a grid row can hold.
#[derive(Clone)]
pub enum LineItem {
    Box(SharedBox),
    Node(NodeId),
}

impl From<&SharedBox> for LineItem {
    fn from(value: &SharedBox) -> Self {
        LineItem::Box(Rc::clone(value))
    }
}

impl From<NodeId> for LineItem {
    fn from(value: NodeId) -> Self {
        LineItem::Node(value)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum LineKey {
    Box(BoxKey),
    Node(NodeId),
}

impl LineItem {
    fn key(&self) -> LineKey {
        match self {
            LineItem::Box(handle) => LineKey::Box(BoxKey::of(handle)),
            LineItem::Node(id) => LineKey::Node(*id),
        }
    }
}

/// One grid row worth of items, each with its own column span.
///
/// Items keep insertion order; adding an item again updates its span in place.
#[derive(Clone, Default)]
pub struct GridLine {
    items: IndexMap<LineKey, (LineItem, i32)>,
}

impl GridLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<LineItem>, width: i32) -> &mut Self {
        let item = item.into();
        match self.items.get_mut(&item.key()) {
            Some(entry) => entry.1 = width,
            None => {
                self.items.insert(item.key(), (item, width));
            }
        }
        self
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total columns the line covers.
    pub fn line_width(&self) -> i32 {
        self.items.values().map(|(_, width)| width).sum()
    }

    /// Span recorded for `item`, 0 when it is not on the line.
    pub fn width_for(&self, item: &LineItem) -> i32 {
        self.items
            .get(&item.key())
            .map(|(_, width)| *width)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LineItem, i32)> + '_ {
        self.items.values().map(|(item, width)| (item, *width))
    }

    /// Show or hide every box on the line, including boxes inside nodes.
    pub fn set_visible(&self, tree: &LayoutTree, visible: bool) {
        for (item, _) in self.items.values() {
            match item {
                LineItem::Box(handle) => handle.borrow_mut().set_visible(visible),
                LineItem::Node(id) => {
                    for handle in tree.boxes(*id) {
                        handle.borrow_mut().set_visible(visible);
                    }
                }
            }
        }
    }
}

/// Row-major cursor for filling a grid container cell by cell.
///
/// Placement starts on the row below whatever the grid already holds. Items
/// that would overflow `width` wrap to the next row.
pub struct GridHelper<'a> {
    coordinator: &'a mut LayoutCoordinator,
    grid_name: String,
    width: i32,
    x: i32,
    y: i32,
}

impl<'a> GridHelper<'a> {
    /// Span that takes the rest of the current row.
    pub const FILL: i32 = -1;

    /// Bind to the grid named `grid_name`. A `width` of 0 adopts the grid's
    /// current column count, which is 0 for an empty grid; row-filling calls
    /// then fail with [`LayoutError::NoGridWidth`].
    pub fn new(
        coordinator: &'a mut LayoutCoordinator,
        grid_name: impl Into<String>,
        width: i32,
    ) -> Result<Self> {
        let grid_name = grid_name.into();
        coordinator.sync_nodes();
        let grid = coordinator.resolve_grid(&grid_name)?;
        let bounds = coordinator.tree().grid_bounds(grid).unwrap_or_default();
        let width = if width == 0 { bounds.width } else { width };
        Ok(Self {
            coordinator,
            grid_name,
            width,
            x: 0,
            y: bounds.bottom(),
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Place a box in the next free cell.
    pub fn add_box(&mut self, handle: &SharedBox) -> Result<NodeId> {
        let constraint = self.next_cell();
        self.coordinator.attach(handle, &self.grid_name, Some(constraint))
    }

    /// Place a node in the next free cell.
    pub fn add_node(&mut self, node: NodeId) -> Result<()> {
        let constraint = self.next_cell();
        self.place_node(node, constraint)
    }

    /// Place a box spanning `span` columns, or the rest of the row for [`Self::FILL`].
    pub fn add_box_span(&mut self, handle: &SharedBox, span: i32) -> Result<NodeId> {
        let constraint = self.next_span(span)?;
        self.coordinator.attach(handle, &self.grid_name, Some(constraint))
    }

    pub fn add_node_span(&mut self, node: NodeId, span: i32) -> Result<()> {
        let constraint = self.next_span(span)?;
        self.place_node(node, constraint)
    }

    /// Place a box at an explicit cell; the cursor does not move.
    pub fn add_box_at(&mut self, handle: &SharedBox, cell: Constraint) -> Result<NodeId> {
        self.coordinator.attach(handle, &self.grid_name, Some(cell))
    }

    pub fn add_node_at(&mut self, node: NodeId, cell: Constraint) -> Result<()> {
        self.place_node(node, cell)
    }

    /// Lay a whole line out on a fresh row, then move below it.
    pub fn add_line(&mut self, line: &GridLine) -> Result<()> {
        if self.x != 0 {
            self.skip_to_next_line();
        }
        for (item, span) in line.iter() {
            let constraint = Constraint::cell(self.x, self.y, span, 1);
            match item {
                LineItem::Box(handle) => {
                    self.coordinator
                        .attach(handle, &self.grid_name, Some(constraint))?;
                }
                LineItem::Node(node) => self.place_node(*node, constraint)?,
            }
            self.x += span;
        }
        self.skip_to_next_line();
        Ok(())
    }

    /// Leave `span` cells empty, wrapping first if they do not fit.
    pub fn skip(&mut self, span: i32) {
        if self.x >= self.width || self.x + span > self.width {
            self.skip_to_next_line();
        }
        self.x += span;
    }

    pub fn skip_to_next_line(&mut self) {
        self.x = 0;
        self.y += 1;
    }

    /// Reserve a full empty row by filling it with an invisible spacer.
    pub fn skip_line(&mut self) -> Result<NodeId> {
        self.require_width()?;
        if self.x != 0 {
            self.skip_to_next_line();
        }
        let spacer: SharedBox = StaticBox::new(0, 0).hidden().shared();
        self.add_box_span(&spacer, self.width)
    }

    fn next_cell(&mut self) -> Constraint {
        if self.x >= self.width {
            self.skip_to_next_line();
        }
        let constraint = Constraint::cell(self.x, self.y, 1, 1);
        self.x += 1;
        constraint
    }

    fn require_width(&self) -> Result<()> {
        if self.width > 0 {
            Ok(())
        } else {
            Err(LayoutError::NoGridWidth(self.grid_name.clone()))
        }
    }

    fn next_span(&mut self, span: i32) -> Result<Constraint> {
        if span < 0 {
            self.require_width()?;
        }
        if self.x >= self.width {
            self.skip_to_next_line();
        }
        let span = if span < 0 { self.width - self.x } else { span };
        if self.x + span > self.width {
            self.skip_to_next_line();
        }
        let constraint = Constraint::cell(self.x, self.y, span, 1);
        self.x += span;
        Ok(constraint)
    }

    fn place_node(&mut self, node: NodeId, cell: Constraint) -> Result<()> {
        self.coordinator
            .register_node(node, Some(&self.grid_name), Some(cell))
    }
}
