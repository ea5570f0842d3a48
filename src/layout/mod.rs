//! Layout tree: node arena, constraints, and the measure/arrange passes.
//!
//! Callers normally go through [`crate::coordinator::LayoutCoordinator`]; the
//! tree itself is id-based and knows nothing about names or registries.

mod alignment;
mod arrange;
mod constraint;
mod core;
pub mod grid;
mod measure;

pub use alignment::{Alignment, Axis};
pub use constraint::{Constraint, NodeVariant};
pub use core::{Children, LayoutTree, NodeId};
pub use grid::{DEFAULT_CELL_MAX, DEFAULT_CELL_MIN, GridModel, MAX_GRID_EXTENT};
