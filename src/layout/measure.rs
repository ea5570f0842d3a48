//! Bottom-up preferred-size pass.

use crate::geometry::{CellRect, FracRect, Size};

use super::alignment::Axis;
use super::core::{LayoutTree, NodeId, NodeKind, cell_bounds};

impl LayoutTree {
    /// Size `id` would like to have, borders included.
    ///
    /// Measuring is not read-only: grids refresh their cell model and leaves whose
    /// box left its container queue themselves for removal and report zero.
    pub fn preferred_size(&mut self, id: NodeId) -> Size {
        let Some(node) = self.nodes.get(id) else {
            return Size::ZERO;
        };
        let border = node.border.unwrap_or_default();
        match &node.kind {
            NodeKind::Leaf(_) => self.leaf_preferred(id),
            NodeKind::Horizontal(list) => {
                let children = list.clone();
                self.flow_preferred(&children, Axis::Horizontal).expand(border)
            }
            NodeKind::Vertical(list) => {
                let children = list.clone();
                self.flow_preferred(&children, Axis::Vertical).expand(border)
            }
            NodeKind::Rect(map) => {
                let children: Vec<(NodeId, FracRect)> =
                    map.iter().map(|(child, frac)| (*child, *frac)).collect();
                self.rect_preferred(&children).expand(border)
            }
            NodeKind::Grid { .. } => self.grid_preferred(id).expand(border),
        }
    }

    fn leaf_preferred(&mut self, id: NodeId) -> Size {
        if self.leaf_drifted(id) {
            self.flag_invalid(id);
            return Size::ZERO;
        }
        let Some(handle) = self.box_of(id) else {
            return Size::ZERO;
        };
        let (visible, preferred) = {
            let content = handle.borrow();
            (content.is_visible(), content.preferred_size())
        };
        if !visible {
            return Size::ZERO;
        }
        Size::new(
            preferred.width + self.hgap(id),
            preferred.height + self.vgap(id),
        )
        .expand(self.border(id))
    }

    /// Sum along the primary axis, max across it.
    fn flow_preferred(&mut self, children: &[NodeId], axis: Axis) -> Size {
        let mut primary = 0;
        let mut cross = 0;
        for child in children {
            let size = self.preferred_size(*child);
            let (along, across) = match axis {
                Axis::Horizontal => (size.width, size.height),
                Axis::Vertical => (size.height, size.width),
            };
            primary += along;
            cross = cross.max(across);
        }
        match axis {
            Axis::Horizontal => Size::new(primary, cross),
            Axis::Vertical => Size::new(cross, primary),
        }
    }

    /// Smallest parent size that gives every child its preferred size.
    fn rect_preferred(&mut self, children: &[(NodeId, FracRect)]) -> Size {
        let mut width = 0.0_f64;
        let mut height = 0.0_f64;
        for (child, frac) in children {
            let size = self.preferred_size(*child);
            if frac.width > 0.0 {
                width = width.max(f64::from(size.width) / frac.width);
            }
            if frac.height > 0.0 {
                height = height.max(f64::from(size.height) / frac.height);
            }
        }
        Size::new(width.ceil() as i32, height.ceil() as i32)
    }

    /// Refresh the grid's cell model from its children and sum the result.
    fn grid_preferred(&mut self, id: NodeId) -> Size {
        let cells: Vec<(NodeId, CellRect)> = match &self.nodes[id].kind {
            NodeKind::Grid { cells, .. } => cells.iter().map(|(c, r)| (*c, *r)).collect(),
            _ => return Size::ZERO,
        };
        let bounds = cell_bounds(cells.iter().map(|(_, cell)| cell));
        let measured: Vec<(CellRect, Size)> = cells
            .iter()
            .map(|(child, cell)| (*cell, self.preferred_size(*child)))
            .collect();

        let Some(model) = self.grid_model_mut(id) else {
            return Size::ZERO;
        };
        let columns = bounds.right() as usize;
        let rows = bounds.bottom() as usize;
        model.reset(columns, rows);
        for (cell, size) in measured {
            // A spanning child asks each of its columns/rows for an equal share.
            let width = size.width / cell.width;
            let height = size.height / cell.height;
            for x in cell.x..cell.right() {
                for y in cell.y..cell.bottom() {
                    model.set_cell_size(x as usize, y as usize, width, height);
                }
            }
        }
        Size::new(model.width_span(0, columns), model.height_span(0, rows))
    }

    /// Preferred size of the box behind a leaf, without gaps or borders.
    pub fn intrinsic_size(&self, id: NodeId) -> Option<Size> {
        let handle = self.box_of(id)?;
        let size = handle.borrow().preferred_size();
        Some(size)
    }
}
