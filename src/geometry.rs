/// Integer size in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow the size by the sum of opposing insets.
    pub fn expand(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal(),
            height: self.height + insets.vertical(),
        }
    }
}

/// Space reserved on each side of a rectangle (borders, container chrome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Rectangle in layout units, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Snap floating edges to the nearest integer edges.
    ///
    /// Rounding both edges (rather than origin and extent) keeps neighbours that
    /// share an edge in float space sharing it after snapping.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let x = left.round() as i32;
        let y = top.round() as i32;
        Self {
            x,
            y,
            width: right.round() as i32 - x,
            height: bottom.round() as i32 - y,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrink by insets; extents never go negative.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal()).max(0),
            height: (self.height - insets.vertical()).max(0),
        }
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Placement of a child in grid-cell units. Spans are at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Single cell at `(x, y)`.
    pub const fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Smallest cell rectangle covering both.
    pub fn union(&self, other: &CellRect) -> CellRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        CellRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Placement of a child as fractions of its parent's rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FracRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FracRect {
    /// The whole parent rectangle.
    pub const UNIT: FracRect = FracRect::new(0.0, 0.0, 1.0, 1.0);

    /// Accepted slack around `[0, 1]` for accumulated float error in callers.
    pub const TOLERANCE: f64 = 0.001;

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return the first edge value outside the accepted range, if any.
    pub fn out_of_range(&self) -> Option<f64> {
        let low = -Self::TOLERANCE;
        let high = 1.0 + Self::TOLERANCE;
        [self.x, self.y, self.x + self.width, self.y + self.height]
            .into_iter()
            .find(|value| value.is_nan() || *value < low || *value > high)
    }

    /// Edges clamped to `[0, 1]` as `(left, top, right, bottom)`.
    pub fn clamped_edges(&self) -> (f64, f64, f64, f64) {
        (
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            (self.x + self.width).clamp(0.0, 1.0),
            (self.y + self.height).clamp(0.0, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_rounds_both_edges() {
        let left = Rect::from_edges(0.0, 0.0, 62.5, 40.0);
        let right = Rect::from_edges(62.5, 0.0, 100.0, 40.0);
        assert_eq!(left.right(), right.x);
        assert_eq!(left.width + right.width, 100);
    }

    #[test]
    fn inset_never_goes_negative() {
        let rect = Rect::new(0, 0, 4, 4).inset(Insets::uniform(3));
        assert_eq!(rect, Rect::new(3, 3, 0, 0));
    }

    #[test]
    fn cell_union_covers_both() {
        let union = CellRect::cell(0, 0).union(&CellRect::new(2, 1, 2, 3));
        assert_eq!(union, CellRect::new(0, 0, 4, 4));
    }

    #[test]
    fn fraction_range_allows_tolerance() {
        assert_eq!(FracRect::new(-0.0005, 0.0, 1.0005, 1.0).out_of_range(), None);
        assert_eq!(FracRect::new(0.5, 0.0, 0.75, 1.0).out_of_range(), Some(1.25));
    }
}
