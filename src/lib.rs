//! Adaptive panel layout engine.
//!
//! Panels holding text or nested layouts are fitted into a frame whose
//! width and height may each be unconstrained, advisory or fixed. The
//! [`flow`] module distributes the frame among the panels, shrinks or
//! grows them one column at a time until the row fits, collapses panels
//! cropped beyond use into an ellipsis and hands leftover columns to
//! panels whose titles do not fit.

pub mod config;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod panel;
pub mod render;
pub mod width;

pub use config::{
    Constraints, HorizontalOverflowMode, MaxTitleHeight, OutputConfig, PanelDesign,
    PanelDesignDims, VerticalOverflowMode,
};
pub use error::{Axis, LayoutError, Result};
pub use flow::{
    FlowConfig, FlowEngine, LayoutFlowContext, PanelResizeHelper, ResizedLayoutDraftPanel,
    optimize_layout_to_fit_frame,
};
pub use geometry::{Dimensions, DimensionsFit, Frame, Proportionally, SizedDims};
pub use layout::{Grid, GridDims, Layout, PanelKey};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{FlowMetrics, MetricSnapshot};
pub use panel::{
    Content, DimensionsAwarePanel, DraftPanel, FullyRenderedPanel, Panel, PanelBody, Stage,
};
pub use render::{AnsiRenderer, RendererSettings};
pub use width::display_width;
