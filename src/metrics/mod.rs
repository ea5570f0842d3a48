use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters for the coordinator's measure/arrange activity.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    measure_passes: u64,
    arrange_passes: u64,
    leaves_attached: u64,
    leaves_detached: u64,
    leaves_swept: u64,
    warnings: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_measure(&mut self) {
        self.measure_passes = self.measure_passes.saturating_add(1);
    }

    pub fn record_arrange(&mut self) {
        self.arrange_passes = self.arrange_passes.saturating_add(1);
    }

    pub fn record_attach(&mut self) {
        self.leaves_attached = self.leaves_attached.saturating_add(1);
    }

    pub fn record_detach(&mut self) {
        self.leaves_detached = self.leaves_detached.saturating_add(1);
    }

    pub fn record_swept(&mut self, count: usize) {
        if count > 0 {
            self.leaves_swept = self.leaves_swept.saturating_add(count as u64);
        }
    }

    pub fn record_warning(&mut self) {
        self.warnings = self.warnings.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            measure_passes: self.measure_passes,
            arrange_passes: self.arrange_passes,
            leaves_attached: self.leaves_attached,
            leaves_detached: self.leaves_detached,
            leaves_swept: self.leaves_swept,
            warnings: self.warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub measure_passes: u64,
    pub arrange_passes: u64,
    pub leaves_attached: u64,
    pub leaves_detached: u64,
    pub leaves_swept: u64,
    pub warnings: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("measure_passes".to_string(), json!(self.measure_passes));
        map.insert("arrange_passes".to_string(), json!(self.arrange_passes));
        map.insert("leaves_attached".to_string(), json!(self.leaves_attached));
        map.insert("leaves_detached".to_string(), json!(self.leaves_detached));
        map.insert("leaves_swept".to_string(), json!(self.leaves_swept));
        map.insert("warnings".to_string(), json!(self.warnings));
        map
    }
}
