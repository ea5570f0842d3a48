//! Constraint-driven layout engine built on a tree of nodes.
//!
//! Containers (horizontal, vertical, fractional rect, grid) own child nodes;
//! leaves wrap host boxes. A bottom-up measure pass computes preferred sizes and
//! a top-down arrange pass hands every box its bounds. The
//! [`LayoutCoordinator`] fronts the tree with name and box registries, logs
//! configuration problems instead of failing, and quietly drops leaves whose
//! boxes were moved to another container behind its back.
//!
//! ```
//! use node_layout::{Insets, LayoutCoordinator, NodeVariant, Rect, SharedBox, StaticBox};
//!
//! let mut layout = LayoutCoordinator::new("root", NodeVariant::Vertical);
//! let header: SharedBox = StaticBox::new(80, 1).shared();
//! let body: SharedBox = StaticBox::new(80, 3).shared();
//! layout.attach(&header, "root", None).unwrap();
//! layout.attach(&body, "root", None).unwrap();
//!
//! layout.arrange(Rect::new(0, 0, 80, 8), Insets::ZERO);
//! assert_eq!(body.borrow().bounds(), Rect::new(0, 2, 80, 6));
//! ```

pub mod config;
pub mod coordinator;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod logging;
pub mod metrics;

pub use config::CoordinatorConfig;
pub use coordinator::{GridHelper, GridLine, LayoutCoordinator, LineItem, NodeRef};
pub use debug::{Outline, OutlinePainter, PainterSettings, RepaintClock};
pub use error::{LayoutError, Result};
pub use geometry::{CellRect, FracRect, Insets, Rect, Size};
pub use host::{BoxKey, ContainerId, HostContainer, LayoutBox, SharedBox, StaticBox, StaticContainer};
pub use layout::{Alignment, Axis, Constraint, GridModel, LayoutTree, NodeId, NodeVariant};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
