//! The resize loop and the ellipsis collapse that may follow it.

use serde_json::json;

use crate::flow::context::Resizability;
use crate::flow::{FlowEngine, LayoutFlowContext};
use crate::logging::{LogLevel, json_kv, json_str};
use crate::metrics::FlowMetrics;

impl FlowEngine {
    /// Resize one panel per iteration until the layout fills the frame
    /// width or an iteration changes nothing. Returns the iteration count.
    pub(crate) fn resize_inner_panels(&self, context: &mut LayoutFlowContext<'_>) -> usize {
        let mut iterations = 0;

        while !context.panel_width_ok() {
            let prev = context.clone();
            iterations += 1;
            self.record(FlowMetrics::record_iteration);

            let delta = context.extra_width().map_or(-1, i32::from);
            self.log_iteration(iterations, delta);

            for key in context.resize_priority() {
                if context.is_removed(&key) {
                    continue;
                }
                let Some(mut helper) = context.resize_helper(&key) else {
                    continue;
                };
                helper.adjust_frame_width(delta, context.min_frame_width());

                if !helper.frame_changed() || helper.orig_frame().is_width_fixed() {
                    continue;
                }

                match context.update_resizability(&key, &helper) {
                    Resizability::NoLongerResizable => {
                        self.record(FlowMetrics::record_unresizable);
                        self.log("resize.unresizable", [json_str("key", key.as_str())]);
                        break;
                    }
                    Resizability::ResizableAgain => {
                        self.record(FlowMetrics::record_resizable_again);
                        self.log_at(
                            LogLevel::Trace,
                            "resize.resizable_again",
                            [json_str("key", key.as_str())],
                        );
                    }
                    Resizability::Unchanged => {}
                }

                if helper.same_cropped_dims() {
                    continue;
                }

                let old_width = helper.prev_cropped_dims().width;
                let panel = helper.into_new_panel();
                self.record(FlowMetrics::record_resize);
                self.log(
                    "resize.commit",
                    [
                        json_str("key", key.as_str()),
                        json_kv("old_width", old_width),
                        json_kv("new_width", panel.cropped_dims().width),
                        json_kv("frame_width", json!(panel.frame().width())),
                    ],
                );
                context.replace_panel(&key, panel);
                break;
            }

            if !context.changed_since(&prev) {
                break;
            }
        }

        iterations
    }

    /// Collapse every overly cropped panel after the first into an
    /// ellipsis. Returns whether anything was collapsed.
    pub(crate) fn collapse_overly_cropped_panels(
        &self,
        context: &mut LayoutFlowContext<'_>,
    ) -> bool {
        let keys: Vec<String> = context
            .dim_aware_layout()
            .keys()
            .skip(1)
            .map(str::to_string)
            .collect();

        let mut collapsed = false;
        for key in keys {
            if context.remove_panel_if_overly_cropped(&key) {
                collapsed = true;
                self.record(FlowMetrics::record_collapsed);
                self.log(
                    "panel.collapsed",
                    [
                        json_str("key", key.as_str()),
                        json_kv("kept", context.dim_aware_layout().contains_key(&key)),
                    ],
                );
            }
        }
        collapsed
    }
}
