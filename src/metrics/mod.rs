use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by the flow engine across layout runs.
#[derive(Debug, Default, Clone)]
pub struct FlowMetrics {
    layouts: u64,
    iterations: u64,
    resizes: u64,
    unresizable: u64,
    resizable_again: u64,
    collapsed: u64,
    title_columns: u64,
}

impl FlowMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_layout(&mut self) {
        self.layouts = self.layouts.saturating_add(1);
    }

    pub fn record_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn record_unresizable(&mut self) {
        self.unresizable = self.unresizable.saturating_add(1);
    }

    pub fn record_resizable_again(&mut self) {
        self.resizable_again = self.resizable_again.saturating_add(1);
    }

    pub fn record_collapsed(&mut self) {
        self.collapsed = self.collapsed.saturating_add(1);
    }

    pub fn record_title_columns(&mut self, count: usize) {
        if count > 0 {
            self.title_columns = self.title_columns.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            layouts: self.layouts,
            iterations: self.iterations,
            resizes: self.resizes,
            unresizable: self.unresizable,
            resizable_again: self.resizable_again,
            collapsed: self.collapsed,
            title_columns: self.title_columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub layouts: u64,
    pub iterations: u64,
    pub resizes: u64,
    pub unresizable: u64,
    pub resizable_again: u64,
    pub collapsed: u64,
    pub title_columns: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "flow_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("layouts".to_string(), json!(self.layouts));
        map.insert("iterations".to_string(), json!(self.iterations));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("unresizable".to_string(), json!(self.unresizable));
        map.insert("resizable_again".to_string(), json!(self.resizable_again));
        map.insert("collapsed".to_string(), json!(self.collapsed));
        map.insert("title_columns".to_string(), json!(self.title_columns));
        map
    }
}

pub fn snapshot_event(snapshot: &MetricSnapshot, target: &str) -> LogEvent {
    snapshot.to_log_event(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_feed_snapshot_event() {
        let mut metrics = FlowMetrics::new();
        metrics.record_layout();
        metrics.record_iteration();
        metrics.record_iteration();
        metrics.record_title_columns(0);
        metrics.record_title_columns(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.iterations, 2);
        assert_eq!(snapshot.title_columns, 3);

        let event = snapshot_event(&snapshot, "panel_flow::metrics");
        assert_eq!(event.message, "flow_metrics");
        assert_eq!(event.fields["layouts"], json!(1));
        assert_eq!(event.fields.len(), 7);
    }
}
