use std::path::Path;
use std::time::Duration;

use crate::host::ContainerId;
use crate::layout::{DEFAULT_CELL_MAX, DEFAULT_CELL_MIN};
use crate::logging::{FileSink, Logger, LoggingResult};

/// Knobs for a [`crate::coordinator::LayoutCoordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Optional structured logger for warnings and sweep events.
    pub logger: Option<Logger>,
    /// Target field used on coordinator and tree events.
    pub log_target: String,
    /// Container the coordinator lays out. Attached boxes are moved into it.
    pub target: Option<ContainerId>,
    /// Debug flag set on the root node at construction.
    pub debug: bool,
    /// How often debug outlines are repainted.
    pub debug_repaint_interval: Duration,
    pub metrics_enabled: bool,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Default minimum for grid columns and rows without an override.
    pub grid_default_min: i32,
    /// Default maximum for grid columns and rows without an override.
    pub grid_default_max: i32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            logger: None,
            log_target: "node_layout::coordinator".to_string(),
            target: None,
            debug: false,
            debug_repaint_interval: Duration::from_millis(500),
            metrics_enabled: false,
            metrics_target: "node_layout::metrics".to_string(),
            grid_default_min: DEFAULT_CELL_MIN,
            grid_default_max: DEFAULT_CELL_MAX,
        }
    }
}

impl CoordinatorConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Log to a JSON-lines file that rolls over past `max_bytes`.
    pub fn with_log_file(self, path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let sink = FileSink::new(path, max_bytes)?;
        Ok(self.with_logger(Logger::new(sink)))
    }

    pub fn with_target(mut self, target: ContainerId) -> Self {
        self.target = Some(target);
        self
    }

    /// Enable metrics collection.
    pub fn enable_metrics(&mut self) {
        self.metrics_enabled = true;
    }

    /// Disable metrics collection and stop snapshot emission.
    pub fn disable_metrics(&mut self) {
        self.metrics_enabled = false;
    }
}
