//! Fitting a single row of panels into a frame.
//!
//! [`FlowEngine::optimize`] runs the passes in order: width distribution,
//! height distribution, frame tightening, the resize loop (followed by the
//! ellipsis collapse when panels end up overly cropped), height reduction,
//! a second tightening and finally title widening.

mod context;
mod engine;
mod passes;
mod resize;
mod resized;
mod titles;

pub use context::{LayoutFlowContext, PanelResizeHelper};
pub use engine::{DEFAULT_FLOW_TARGET, FlowConfig, FlowEngine};
pub use resized::ResizedLayoutDraftPanel;

use crate::error::Result;
use crate::panel::DraftPanel;

/// Fit the layout held by `input` with a default engine.
pub fn optimize_layout_to_fit_frame(input: &DraftPanel) -> Result<ResizedLayoutDraftPanel> {
    FlowEngine::default().optimize(input)
}
