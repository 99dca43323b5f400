//! Output configuration carried by every panel.
//!
//! The layout engine reads only the panel design, the overflow modes, the
//! title height policy and the crop-width policy. Everything is passed
//! between panel stages unchanged.

mod core;

pub use core::{
    Constraints, DOUBLE_LINE_TITLE_HEIGHT, HorizontalOverflowMode,
    MIN_PANEL_LINES_FOR_DOUBLE_LINE_TITLE, MIN_PANEL_LINES_FOR_SINGLE_LINE_TITLE, MaxTitleHeight,
    OutputConfig, PanelDesign, PanelDesignDims, SINGLE_LINE_TITLE_HEIGHT, TITLE_BLANK_LINES,
    VerticalOverflowMode,
};
