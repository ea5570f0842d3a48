//! Debug outlines for nodes whose inherited debug flag is set.
//!
//! Outlines never feed back into geometry; they are drawn over whatever the
//! host painted, on the host's own schedule.

mod core;
pub mod cursor;

pub use core::{Outline, OutlinePainter, PainterSettings, RepaintClock};
