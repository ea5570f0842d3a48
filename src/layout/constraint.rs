use crate::geometry::{CellRect, FracRect};

/// Placement descriptor supplied when a child joins a container.
///
/// Horizontal and vertical containers take no payload; pass `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Cell placement inside a grid container.
    Cell(CellRect),
    /// Fractional placement inside a rect container.
    Fraction(FracRect),
}

impl Constraint {
    pub const fn cell(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::Cell(CellRect::new(x, y, width, height))
    }

    pub const fn fraction(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Fraction(FracRect::new(x, y, width, height))
    }
}

impl From<CellRect> for Constraint {
    fn from(value: CellRect) -> Self {
        Self::Cell(value)
    }
}

impl From<FracRect> for Constraint {
    fn from(value: FracRect) -> Self {
        Self::Fraction(value)
    }
}

/// Container flavours a caller can create. Leaves are created by attaching boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeVariant {
    /// Children side by side, left to right.
    Horizontal,
    /// Children stacked, top to bottom.
    Vertical,
    /// Children placed at fractions of the container.
    Rect,
    /// Children placed on integer cells.
    Grid,
}
