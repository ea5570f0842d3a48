//! Error module orchestrator.
//!
//! The enum lives in `types` so the layout and logging modules can depend on it
//! without pulling in each other.

mod types;

pub use types::{LayoutError, Result};
