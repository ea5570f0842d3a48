use crate::error::{LayoutError, Result};

/// Placement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How a node or box sits inside the space it is given along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Scale to fill the destination exactly.
    #[default]
    Stretched,
    Left,
    Right,
    Center,
    Top,
    Bottom,
}

impl Alignment {
    /// Reject values that only make sense on the other axis.
    pub fn check(self, axis: Axis) -> Result<Self> {
        let legal = match axis {
            Axis::Horizontal => !matches!(self, Alignment::Top | Alignment::Bottom),
            Axis::Vertical => !matches!(self, Alignment::Left | Alignment::Right),
        };
        if legal {
            Ok(self)
        } else {
            Err(LayoutError::IllegalAlignment {
                alignment: self,
                axis,
            })
        }
    }

    pub fn is_stretched(self) -> bool {
        self == Alignment::Stretched
    }

    /// Offset of a `preferred` extent inside a `dest` extent, never negative.
    pub fn offset(self, dest: i32, preferred: i32) -> i32 {
        match self {
            Alignment::Right | Alignment::Bottom => (dest - preferred).max(0),
            Alignment::Center => ((dest - preferred) / 2).max(0),
            Alignment::Stretched | Alignment::Left | Alignment::Top => 0,
        }
    }
}

/// Scale factor mapping `preferred` onto `dest`; 1 when there is nothing to scale.
pub(crate) fn scale(dest: i32, preferred: i32) -> f64 {
    if preferred <= 0 {
        1.0
    } else {
        f64::from(dest) / f64::from(preferred)
    }
}
