//! Per-axis cell measurements for a grid container.
//!
//! A grid node measures its children every pass and records, per column and per
//! row, the largest extent any child needs there. Reads go through the clamp
//! layer: a per-index minimum/maximum when one is set, the model-wide default
//! otherwise.
//!
//! # Example
//! ```
//! use node_layout::layout::GridModel;
//!
//! let mut model = GridModel::new();
//! model.reset(2, 1);
//! model.set_cell_size(0, 0, 50, 20);
//! model.set_cell_size(1, 0, 30, 25);
//! model.set_max_width(0, 40);
//!
//! assert_eq!(model.cell_width(0), 40);
//! assert_eq!(model.cell_width(1), 30);
//! assert_eq!(model.cell_height(0), 25);
//! ```

use crate::geometry::Size;

/// Global minimum applied to any column or row without its own override.
pub const DEFAULT_CELL_MIN: i32 = 0;

/// Global maximum applied to any column or row without its own override.
pub const DEFAULT_CELL_MAX: i32 = 10_000;

/// Largest column or row edge a grid cell may reach. Keeps the per-axis
/// arrays bounded and `x + width` well inside `i32`.
pub const MAX_GRID_EXTENT: i32 = 65_535;

/// Extra slots reserved whenever an axis array has to grow.
const GROWTH_SLACK: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    widths: Vec<i32>,
    heights: Vec<i32>,
    min_widths: Vec<Option<i32>>,
    max_widths: Vec<Option<i32>>,
    min_heights: Vec<Option<i32>>,
    max_heights: Vec<Option<i32>>,
    default_min: i32,
    default_max: i32,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_CELL_MIN, DEFAULT_CELL_MAX)
    }

    pub fn with_defaults(default_min: i32, default_max: i32) -> Self {
        Self {
            widths: Vec::new(),
            heights: Vec::new(),
            min_widths: Vec::new(),
            max_widths: Vec::new(),
            min_heights: Vec::new(),
            max_heights: Vec::new(),
            default_min,
            default_max,
        }
    }

    /// Drop all measurements and size the axes for a fresh pass.
    ///
    /// Overrides and defaults survive; only measured extents are cleared.
    pub fn reset(&mut self, columns: usize, rows: usize) {
        self.widths.clear();
        self.widths.resize(columns, 0);
        self.heights.clear();
        self.heights.resize(rows, 0);
    }

    pub fn columns(&self) -> usize {
        self.widths.len()
    }

    pub fn rows(&self) -> usize {
        self.heights.len()
    }

    /// Record that cell `(x, y)` needs at least `width` x `height`.
    pub fn set_cell_size(&mut self, x: usize, y: usize, width: i32, height: i32) {
        grow(&mut self.widths, x, 0);
        grow(&mut self.heights, y, 0);
        self.widths[x] = self.widths[x].max(width);
        self.heights[y] = self.heights[y].max(height);
    }

    /// Raw measured width of column `x`, before clamping.
    pub fn measured_width(&self, x: usize) -> i32 {
        self.widths.get(x).copied().unwrap_or(0)
    }

    pub fn measured_height(&self, y: usize) -> i32 {
        self.heights.get(y).copied().unwrap_or(0)
    }

    /// Bounds of column `x` as `(min, max)`. A max below the min wins.
    pub fn width_limits(&self, x: usize) -> (i32, i32) {
        limits(
            override_at(&self.min_widths, x).unwrap_or(self.default_min),
            override_at(&self.max_widths, x).unwrap_or(self.default_max),
        )
    }

    pub fn height_limits(&self, y: usize) -> (i32, i32) {
        limits(
            override_at(&self.min_heights, y).unwrap_or(self.default_min),
            override_at(&self.max_heights, y).unwrap_or(self.default_max),
        )
    }

    /// Effective width of column `x`.
    pub fn cell_width(&self, x: usize) -> i32 {
        let (min, max) = self.width_limits(x);
        self.measured_width(x).clamp(min, max)
    }

    /// Effective height of row `y`.
    pub fn cell_height(&self, y: usize) -> i32 {
        let (min, max) = self.height_limits(y);
        self.measured_height(y).clamp(min, max)
    }

    /// Edges of columns `0..count` once their effective widths are scaled by
    /// `factor`, as `count + 1` offsets from the grid's left edge.
    ///
    /// Columns stay inside their limits; what a clamped column cannot take is
    /// shared among the others in proportion to their widths.
    pub fn column_edges(&self, count: usize, factor: f64) -> Vec<f64> {
        let base: Vec<i32> = (0..count).map(|x| self.cell_width(x)).collect();
        let bounds: Vec<(i32, i32)> = (0..count).map(|x| self.width_limits(x)).collect();
        edges(&distribute(&base, &bounds, factor))
    }

    /// Row counterpart of [`GridModel::column_edges`].
    pub fn row_edges(&self, count: usize, factor: f64) -> Vec<f64> {
        let base: Vec<i32> = (0..count).map(|y| self.cell_height(y)).collect();
        let bounds: Vec<(i32, i32)> = (0..count).map(|y| self.height_limits(y)).collect();
        edges(&distribute(&base, &bounds, factor))
    }

    pub fn cell_size(&self, x: usize, y: usize) -> Size {
        Size::new(self.cell_width(x), self.cell_height(y))
    }

    /// Sum of effective column widths over `from..to`.
    pub fn width_span(&self, from: usize, to: usize) -> i32 {
        (from..to).map(|x| self.cell_width(x)).sum()
    }

    /// Sum of effective row heights over `from..to`.
    pub fn height_span(&self, from: usize, to: usize) -> i32 {
        (from..to).map(|y| self.cell_height(y)).sum()
    }

    pub fn set_min_width(&mut self, x: usize, value: i32) {
        set_override(&mut self.min_widths, x, Some(value));
    }

    pub fn set_max_width(&mut self, x: usize, value: i32) {
        set_override(&mut self.max_widths, x, Some(value));
    }

    pub fn set_min_height(&mut self, y: usize, value: i32) {
        set_override(&mut self.min_heights, y, Some(value));
    }

    pub fn set_max_height(&mut self, y: usize, value: i32) {
        set_override(&mut self.max_heights, y, Some(value));
    }

    /// Remove every per-index override for column `x`.
    pub fn clear_width_limits(&mut self, x: usize) {
        set_override(&mut self.min_widths, x, None);
        set_override(&mut self.max_widths, x, None);
    }

    pub fn clear_height_limits(&mut self, y: usize) {
        set_override(&mut self.min_heights, y, None);
        set_override(&mut self.max_heights, y, None);
    }

    pub fn default_min(&self) -> i32 {
        self.default_min
    }

    pub fn default_max(&self) -> i32 {
        self.default_max
    }

    pub fn set_default_min(&mut self, value: i32) {
        self.default_min = value;
    }

    pub fn set_default_max(&mut self, value: i32) {
        self.default_max = value;
    }
}

fn limits(min: i32, max: i32) -> (i32, i32) {
    (min.min(max), max)
}

/// Scale `base` so it sums to `base * factor` while every entry stays inside
/// its bounds. Entries that hit a bound are frozen there and the remainder is
/// spread over the rest; when everything freezes the total falls short.
fn distribute(base: &[i32], bounds: &[(i32, i32)], factor: f64) -> Vec<f64> {
    let target = f64::from(base.iter().sum::<i32>()) * factor;
    let mut frozen: Vec<Option<f64>> = vec![None; base.len()];
    loop {
        let fixed: f64 = frozen.iter().flatten().sum();
        let free: i32 = base
            .iter()
            .zip(&frozen)
            .filter(|(_, slot)| slot.is_none())
            .map(|(value, _)| *value)
            .sum();
        let ratio = if free > 0 {
            (target - fixed) / f64::from(free)
        } else {
            factor
        };

        let mut over = Vec::new();
        let mut under = Vec::new();
        let mut excess = 0.0;
        for (index, value) in base.iter().enumerate() {
            if frozen[index].is_some() {
                continue;
            }
            let (min, max) = bounds[index];
            let scaled = f64::from(*value) * ratio;
            if scaled > f64::from(max) {
                excess += scaled - f64::from(max);
                over.push(index);
            } else if scaled < f64::from(min) {
                excess -= f64::from(min) - scaled;
                under.push(index);
            }
        }

        // Freeze the side that dominates; the other may resolve once it moves.
        let pinned = if excess > 0.0 {
            over.into_iter().map(|index| (index, bounds[index].1)).collect::<Vec<_>>()
        } else if excess < 0.0 {
            under.into_iter().map(|index| (index, bounds[index].0)).collect()
        } else if !over.is_empty() || !under.is_empty() {
            over.into_iter()
                .map(|index| (index, bounds[index].1))
                .chain(under.into_iter().map(|index| (index, bounds[index].0)))
                .collect()
        } else {
            return base
                .iter()
                .zip(frozen)
                .map(|(value, slot)| slot.unwrap_or(f64::from(*value) * ratio))
                .collect();
        };
        for (index, value) in pinned {
            frozen[index] = Some(f64::from(value));
        }
    }
}

fn edges(extents: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(extents.len() + 1);
    let mut total = 0.0;
    offsets.push(total);
    for extent in extents {
        total += extent;
        offsets.push(total);
    }
    offsets
}

fn grow<T: Clone>(values: &mut Vec<T>, index: usize, fill: T) {
    if index >= values.len() {
        values.resize(index + GROWTH_SLACK, fill);
    }
}

fn override_at(values: &[Option<i32>], index: usize) -> Option<i32> {
    values.get(index).copied().flatten()
}

fn set_override(values: &mut Vec<Option<i32>>, index: usize, value: Option<i32>) {
    grow(values, index, None);
    values[index] = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_size_keeps_largest_extent() {
        let mut model = GridModel::new();
        model.reset(1, 1);
        model.set_cell_size(0, 0, 30, 10);
        model.set_cell_size(0, 0, 20, 15);
        assert_eq!(model.cell_size(0, 0), Size::new(30, 15));
    }

    #[test]
    fn growth_over_allocates() {
        let mut model = GridModel::new();
        model.reset(0, 0);
        model.set_cell_size(3, 0, 10, 10);
        assert_eq!(model.columns(), 8);
        assert_eq!(model.rows(), 5);
        assert_eq!(model.measured_width(7), 0);
    }

    #[test]
    fn reset_clears_measurements_but_keeps_limits() {
        let mut model = GridModel::new();
        model.set_min_width(0, 12);
        model.set_cell_size(0, 0, 40, 5);
        model.reset(1, 1);
        assert_eq!(model.measured_width(0), 0);
        assert_eq!(model.cell_width(0), 12);
    }

    #[test]
    fn global_defaults_bound_unlimited_cells() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 20_000, -5);
        assert_eq!(model.cell_width(0), DEFAULT_CELL_MAX);
        assert_eq!(model.cell_height(0), DEFAULT_CELL_MIN);

        model.set_default_max(500);
        assert_eq!(model.cell_width(0), 500);
    }

    #[test]
    fn per_index_limits_override_defaults() {
        let mut model = GridModel::new();
        model.set_cell_size(1, 1, 5, 90);
        model.set_min_width(1, 25);
        model.set_max_height(1, 60);
        assert_eq!(model.cell_width(1), 25);
        assert_eq!(model.cell_height(1), 60);

        model.clear_height_limits(1);
        assert_eq!(model.cell_height(1), 90);
    }

    #[test]
    fn conflicting_limits_resolve_to_max() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 10, 10);
        model.set_min_width(0, 50);
        model.set_max_width(0, 30);
        assert_eq!(model.cell_width(0), 30);
    }

    #[test]
    fn spans_sum_effective_extents() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 10, 4);
        model.set_cell_size(1, 1, 20, 6);
        model.set_cell_size(2, 2, 30, 8);
        assert_eq!(model.width_span(0, 3), 60);
        assert_eq!(model.width_span(1, 3), 50);
        assert_eq!(model.height_span(0, 2), 10);
    }

    #[test]
    fn unclamped_edges_scale_linearly() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 50, 1);
        model.set_cell_size(1, 0, 30, 1);
        assert_eq!(model.column_edges(2, 1.25), vec![0.0, 62.5, 100.0]);
        assert_eq!(model.column_edges(2, 1.0), vec![0.0, 50.0, 80.0]);
    }

    #[test]
    fn stretched_column_stops_at_its_maximum() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 20, 1);
        model.set_cell_size(1, 0, 20, 1);
        model.set_max_width(0, 20);
        // 40 wide stretched to 100: column 0 is capped, column 1 takes the rest.
        assert_eq!(model.column_edges(2, 2.5), vec![0.0, 20.0, 100.0]);
    }

    #[test]
    fn shrunk_row_stops_at_its_minimum() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 1, 40);
        model.set_cell_size(0, 1, 1, 40);
        model.set_min_height(0, 30);
        assert_eq!(model.row_edges(2, 0.5), vec![0.0, 30.0, 40.0]);
    }

    #[test]
    fn fully_clamped_axis_falls_short() {
        let mut model = GridModel::new();
        model.set_cell_size(0, 0, 10, 1);
        model.set_cell_size(1, 0, 10, 1);
        model.set_max_width(0, 10);
        model.set_max_width(1, 15);
        assert_eq!(model.column_edges(2, 5.0), vec![0.0, 10.0, 25.0]);
    }
}
