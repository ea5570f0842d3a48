//! Top-down placement pass.

use crate::geometry::{CellRect, FracRect, Rect, Size};

use super::alignment::{Alignment, Axis, scale};
use super::core::{LayoutTree, NodeId, NodeKind};

impl LayoutTree {
    /// Place `id` and everything below it inside `dest`.
    ///
    /// Containers first drop leaves whose boxes left their container, then
    /// measure themselves and hand each child its share of `dest`.
    pub fn layout(&mut self, id: NodeId, dest: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.resolved = Some(dest);
        if node.is_leaf() {
            self.layout_leaf(id, dest);
            return;
        }

        self.remove_invalid_nodes(id);
        let placements = match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Horizontal(_)) => self.place_flow(id, dest, Axis::Horizontal),
            Some(NodeKind::Vertical(_)) => self.place_flow(id, dest, Axis::Vertical),
            Some(NodeKind::Rect(_)) => self.place_fractions(id, dest),
            Some(NodeKind::Grid { .. }) => self.place_cells(id, dest),
            Some(NodeKind::Leaf(_)) | None => Vec::new(),
        };
        for (child, rect) in placements {
            self.layout(child, rect);
        }
    }

    fn layout_leaf(&mut self, id: NodeId, dest: Rect) {
        if self.leaf_drifted(id) {
            self.flag_invalid(id);
            return;
        }
        let Some(handle) = self.box_of(id) else {
            return;
        };
        let (horizontal, vertical) = self.alignments(id);
        let hgap = f64::from(self.hgap(id));
        let vgap = f64::from(self.vgap(id));
        let border = self.border(id);

        let (left, top, width, height) = if horizontal.is_stretched() && vertical.is_stretched() {
            (
                f64::from(dest.x),
                f64::from(dest.y),
                f64::from(dest.width),
                f64::from(dest.height),
            )
        } else {
            let preferred = self.preferred_size(id);
            let (left, width) = if horizontal.is_stretched() {
                let factor = scale(dest.width, preferred.width);
                (f64::from(dest.x), f64::from(preferred.width) * factor)
            } else {
                let dx = horizontal.offset(dest.width, preferred.width);
                (f64::from(dest.x + dx), f64::from(preferred.width))
            };
            let (top, height) = if vertical.is_stretched() {
                let factor = scale(dest.height, preferred.height);
                (f64::from(dest.y), f64::from(preferred.height) * factor)
            } else {
                let dy = vertical.offset(dest.height, preferred.height);
                (f64::from(dest.y + dy), f64::from(preferred.height))
            };
            (left, top, width, height)
        };

        let placed = Rect::from_edges(left + hgap, top + vgap, left + width, top + height);
        let placed = Rect::new(placed.x, placed.y, placed.width.max(0), placed.height.max(0))
            .inset(border);
        handle.borrow_mut().set_bounds(placed);
    }

    /// Lay children out one after another along `axis`.
    fn place_flow(&mut self, id: NodeId, dest: Rect, axis: Axis) -> Vec<(NodeId, Rect)> {
        let children: Vec<NodeId> = self.children(id).collect();
        let border = self.border(id);
        let area = dest.inset(border);
        let preferred = self.preferred_size(id);
        let content = Size::new(
            preferred.width - border.horizontal(),
            preferred.height - border.vertical(),
        );
        let (horizontal, vertical) = self.alignments(id);

        let (primary_align, cross_align) = match axis {
            Axis::Horizontal => (horizontal, vertical),
            Axis::Vertical => (vertical, horizontal),
        };
        let (dest_primary, dest_cross, pref_primary, pref_cross) = match axis {
            Axis::Horizontal => (area.width, area.height, content.width, content.height),
            Axis::Vertical => (area.height, area.width, content.height, content.width),
        };

        let factor = if primary_align.is_stretched() || dest_primary < pref_primary {
            scale(dest_primary, pref_primary)
        } else {
            1.0
        };
        let cross = if cross_align.is_stretched() {
            dest_cross
        } else {
            dest_cross.min(pref_cross)
        };
        let origin_x = area.x + horizontal.offset(area.width, content.width);
        let origin_y = area.y + vertical.offset(area.height, content.height);

        let mut cursor = match axis {
            Axis::Horizontal => f64::from(origin_x),
            Axis::Vertical => f64::from(origin_y),
        };
        let mut placements = Vec::with_capacity(children.len());
        for child in children {
            let size = self.preferred_size(child);
            let along = match axis {
                Axis::Horizontal => f64::from(size.width),
                Axis::Vertical => f64::from(size.height),
            } * factor;
            let rect = match axis {
                Axis::Horizontal => Rect::from_edges(
                    cursor,
                    f64::from(origin_y),
                    cursor + along,
                    f64::from(origin_y + cross),
                ),
                Axis::Vertical => Rect::from_edges(
                    f64::from(origin_x),
                    cursor,
                    f64::from(origin_x + cross),
                    cursor + along,
                ),
            };
            placements.push((child, rect));
            cursor += along;
        }
        placements
    }

    /// Map every child's fractional rectangle onto `dest`.
    fn place_fractions(&mut self, id: NodeId, dest: Rect) -> Vec<(NodeId, Rect)> {
        let area = dest.inset(self.border(id));
        let fractions: Vec<(NodeId, FracRect)> = match &self.nodes[id].kind {
            NodeKind::Rect(map) => map.iter().map(|(c, f)| (*c, *f)).collect(),
            _ => return Vec::new(),
        };
        let (x, y) = (f64::from(area.x), f64::from(area.y));
        let (width, height) = (f64::from(area.width), f64::from(area.height));
        fractions
            .into_iter()
            .map(|(child, frac)| {
                let (left, top, right, bottom) = frac.clamped_edges();
                let rect = Rect::from_edges(
                    x + width * left,
                    y + height * top,
                    x + width * right,
                    y + height * bottom,
                );
                (child, rect)
            })
            .collect()
    }

    /// Convert cell placements to pixels using the freshly measured cell model.
    fn place_cells(&mut self, id: NodeId, dest: Rect) -> Vec<(NodeId, Rect)> {
        let border = self.border(id);
        let area = dest.inset(border);
        let preferred = self.preferred_size(id);
        let content = Size::new(
            preferred.width - border.horizontal(),
            preferred.height - border.vertical(),
        );
        let (horizontal, vertical) = self.alignments(id);

        let mx = if horizontal.is_stretched() {
            scale(area.width, content.width)
        } else {
            1.0
        };
        let my = if vertical.is_stretched() {
            scale(area.height, content.height)
        } else {
            1.0
        };
        let left = f64::from(area.x + horizontal.offset(area.width, content.width));
        let top = f64::from(area.y + vertical.offset(area.height, content.height));

        let (cells, model) = match &self.nodes[id].kind {
            NodeKind::Grid { cells, model } => (cells, model),
            _ => return Vec::new(),
        };
        let columns = cells.values().map(|cell| cell.right()).max().unwrap_or(0);
        let rows = cells.values().map(|cell| cell.bottom()).max().unwrap_or(0);
        let xs = model.column_edges(columns.max(0) as usize, mx);
        let ys = model.row_edges(rows.max(0) as usize, my);
        cells
            .iter()
            .map(|(child, cell)| {
                let CellRect { x, y, .. } = *cell;
                let rect = Rect::from_edges(
                    left + xs[x as usize],
                    top + ys[y as usize],
                    left + xs[cell.right() as usize],
                    top + ys[cell.bottom() as usize],
                );
                (*child, rect)
            })
            .collect()
    }

    fn alignments(&self, id: NodeId) -> (Alignment, Alignment) {
        self.nodes
            .get(id)
            .map(|node| (node.horizontal, node.vertical))
            .unwrap_or_default()
    }
}
