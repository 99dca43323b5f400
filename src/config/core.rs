use serde::{Deserialize, Serialize};

/// Blank lines separating a title from the panel content.
pub const TITLE_BLANK_LINES: u16 = 1;
/// Lines needed by a one-line title including its blank line.
pub const SINGLE_LINE_TITLE_HEIGHT: u16 = 1 + TITLE_BLANK_LINES;
/// Lines needed by a two-line title including its blank line.
pub const DOUBLE_LINE_TITLE_HEIGHT: u16 = 2 + TITLE_BLANK_LINES;
/// Content lines that must stay visible before a one-line title may
/// overlap the panel.
pub const MIN_PANEL_LINES_FOR_SINGLE_LINE_TITLE: u16 = 2;
/// Content lines that must stay visible before a two-line title may
/// overlap the panel.
pub const MIN_PANEL_LINES_FOR_DOUBLE_LINE_TITLE: u16 = 4;

/// Border style used when panels are composed into a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelDesign {
    /// Single-row table grid: `│ a │ b │`.
    #[default]
    Table,
}

/// Character budget spent on borders and separators by a panel design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDesignDims {
    pub horizontal_chars_per_panel: u16,
    pub horizontal_end_chars: u16,
    pub vertical_lines_per_panel: u16,
    pub vertical_end_lines: u16,
}

impl PanelDesignDims {
    pub const fn for_design(design: PanelDesign) -> Self {
        match design {
            PanelDesign::Table => Self {
                horizontal_chars_per_panel: 3,
                horizontal_end_chars: 1,
                vertical_lines_per_panel: 1,
                vertical_end_lines: 1,
            },
        }
    }

    pub fn extra_horizontal_chars(&self, num_panels: usize) -> u32 {
        extra_chars(
            self.horizontal_chars_per_panel,
            self.horizontal_end_chars,
            num_panels,
        )
    }

    pub fn extra_vertical_lines(&self, num_panels: usize) -> u32 {
        extra_chars(
            self.vertical_lines_per_panel,
            self.vertical_end_lines,
            num_panels,
        )
    }
}

fn extra_chars(per_panel: u16, end: u16, num_panels: usize) -> u32 {
    let num_panels = u32::try_from(num_panels).unwrap_or(u32::MAX);
    num_panels
        .saturating_mul(u32::from(per_panel))
        .saturating_add(u32::from(end))
}

/// What happens to lines wider than the panel frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalOverflowMode {
    /// Cut the line and mark the cut with `…`.
    #[default]
    Ellipsis,
    /// Cut the line silently.
    Crop,
    /// Wrap the line onto following lines.
    WordWrap,
}

/// What happens to content taller than the panel frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOverflowMode {
    CropTop,
    #[default]
    CropBottom,
    EllipsisTop,
    EllipsisBottom,
}

/// Upper bound on the number of title lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxTitleHeight {
    /// Decide from the available frame height.
    #[default]
    Auto,
    Zero,
    One,
    Two,
}

impl MaxTitleHeight {
    /// Clamp an automatically derived title height to this policy.
    pub fn limit(self, auto_height: u16) -> u16 {
        match self {
            MaxTitleHeight::Auto => auto_height,
            MaxTitleHeight::Zero => 0,
            MaxTitleHeight::One => auto_height.min(1),
            MaxTitleHeight::Two => auto_height.min(2),
        }
    }
}

/// Configuration copied verbatim between the stages of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub panel_design: PanelDesign,
    pub horizontal_overflow: HorizontalOverflowMode,
    pub vertical_overflow: VerticalOverflowMode,
    pub tab_size: u16,
    pub max_title_height: MaxTitleHeight,
    /// Panels cropped narrower than this may be collapsed into an ellipsis.
    pub min_crop_width: u16,
    pub use_min_crop_width: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            panel_design: PanelDesign::default(),
            horizontal_overflow: HorizontalOverflowMode::default(),
            vertical_overflow: VerticalOverflowMode::default(),
            tab_size: 4,
            max_title_height: MaxTitleHeight::default(),
            min_crop_width: 3,
            use_min_crop_width: false,
        }
    }
}

impl OutputConfig {
    pub fn design_dims(&self) -> PanelDesignDims {
        PanelDesignDims::for_design(self.panel_design)
    }

    pub fn with_horizontal_overflow(mut self, mode: HorizontalOverflowMode) -> Self {
        self.horizontal_overflow = mode;
        self
    }

    pub fn with_vertical_overflow(mut self, mode: VerticalOverflowMode) -> Self {
        self.vertical_overflow = mode;
        self
    }

    pub fn with_min_crop_width(mut self, min_crop_width: u16) -> Self {
        self.min_crop_width = min_crop_width;
        self.use_min_crop_width = true;
        self
    }

    pub fn with_max_title_height(mut self, max_title_height: MaxTitleHeight) -> Self {
        self.max_title_height = max_title_height;
        self
    }
}

/// Content constraints, opaque to the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub container_width_per_line_limit: Option<u16>,
}
