use thiserror::Error;

use crate::geometry::CellRect;
use crate::layout::{Alignment, Axis};
use crate::logging::LoggingError;

/// Unified result type for the node layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("alignment {alignment:?} is not valid on the {axis:?} axis")]
    IllegalAlignment { alignment: Alignment, axis: Axis },
    #[error("layout node `{0}` not found")]
    NodeNotFound(String),
    #[error("no leaf registered for box")]
    LeafNotFound,
    #[error("node `{0}` cannot hold children")]
    NotAContainer(String),
    #[error("node `{0}` is not a grid")]
    NotAGrid(String),
    #[error("grid node `{0}` requires a cell constraint")]
    MissingCellConstraint(String),
    #[error("invalid cell placement {0:?}: origin must be >= 0, span >= 1x1, inside the grid extent")]
    InvalidCell(CellRect),
    #[error("grid helper for `{0}` has no width; pass one when the grid is empty")]
    NoGridWidth(String),
    #[error("fraction {0} outside [-0.001, 1.001]")]
    FractionOutOfRange(f64),
    #[error("constraint kind does not match node `{0}`")]
    WrongConstraint(String),
    #[error("node is already attached to another parent")]
    AlreadyAttached,
    #[error("adding node would create a cycle")]
    Cycle,
    #[error("node handle refers to a removed node")]
    StaleNode,
    #[error("registry mismatch for node `{0}`")]
    RegistryMismatch(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}
