use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::{LayoutError, Result};
use crate::flow::{LayoutFlowContext, ResizedLayoutDraftPanel, passes};
use crate::layout::Layout;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::FlowMetrics;
use crate::panel::{Content, DraftPanel, Panel};

pub const DEFAULT_FLOW_TARGET: &str = "panel_flow::flow";

/// Configuration knobs for the flow engine.
#[derive(Clone)]
pub struct FlowConfig {
    /// Optional structured logger receiving flow events.
    pub logger: Option<Logger>,
    /// Level used for flow events other than per-iteration traces.
    pub log_level: LogLevel,
    /// Target field used for every flow event.
    pub log_target: String,
    /// Emit a trace event for every resize iteration.
    pub log_iterations: bool,
    /// Counters shared with the caller.
    pub metrics: Option<Arc<Mutex<FlowMetrics>>>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            logger: None,
            log_level: LogLevel::Debug,
            log_target: DEFAULT_FLOW_TARGET.to_string(),
            log_iterations: false,
            metrics: None,
        }
    }
}

impl FlowConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(FlowMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<FlowMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Fits layouts of panels into their frames.
#[derive(Clone, Default)]
pub struct FlowEngine {
    config: FlowConfig,
}

impl FlowEngine {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Fit the layout held by `input` into the frame of `input`.
    pub fn optimize(&self, input: &DraftPanel) -> Result<ResizedLayoutDraftPanel> {
        match &input.content {
            Content::Layout(layout) => Ok(self.flow_layout(input, layout)),
            Content::Text(_) => Err(LayoutError::NotALayout),
        }
    }

    pub(crate) fn flow_layout(
        &self,
        input: &DraftPanel,
        layout: &Layout<Panel>,
    ) -> ResizedLayoutDraftPanel {
        let frame = input.frame;
        self.record(FlowMetrics::record_layout);
        self.log(
            "layout.start",
            [
                json_kv("panels", layout.len()),
                json_kv("frame_width", frame.width()),
                json_kv("frame_height", frame.height()),
            ],
        );

        let mut draft_layout = match frame.width() {
            Some(width) => passes::distribute_widths(input, layout, width, self),
            None => layout.clone(),
        };
        if let Some(height) = frame.height() {
            draft_layout = passes::set_inner_panel_heights(input, &draft_layout, height, self);
        }

        let mut context = LayoutFlowContext::new(self, input, layout, draft_layout);
        passes::tighten_panel_frame_widths(&mut context);

        let mut iterations = 0;
        if frame.width().is_some() && context.draft_layout().len() > 1 {
            iterations += self.resize_inner_panels(&mut context);
            if self.collapse_overly_cropped_panels(&mut context) {
                iterations += self.resize_inner_panels(&mut context);
            }
        }

        if frame.height().is_some() {
            passes::reduce_panel_heights(&mut context);
        }

        if frame.width().is_some() {
            passes::tighten_panel_frame_widths(&mut context);
            self.widen_inner_panels_for_titles(&mut context);
        }

        let dims = context.layout_dims();
        self.log(
            "layout.done",
            [
                json_kv("iterations", iterations),
                json_kv("width", dims.width),
                json_kv("height", dims.height),
                json_kv("panels", context.dim_aware_layout().len()),
            ],
        );
        context.into_resized_panel()
    }

    pub(crate) fn log<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.log_at(self.config.log_level, message, fields);
    }

    pub(crate) fn log_at<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn log_iteration(&self, iteration: usize, delta: i32) {
        if self.config.log_iterations {
            self.log_at(
                LogLevel::Trace,
                "resize.iteration",
                [json_kv("iteration", iteration), json_kv("delta", json!(delta))],
            );
        }
    }

    pub(crate) fn record(&self, update: impl FnOnce(&mut FlowMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }
}
