use std::sync::Arc;

use crate::config::{
    DOUBLE_LINE_TITLE_HEIGHT, HorizontalOverflowMode, MIN_PANEL_LINES_FOR_DOUBLE_LINE_TITLE,
    MIN_PANEL_LINES_FOR_SINGLE_LINE_TITLE, OutputConfig, SINGLE_LINE_TITLE_HEIGHT,
    TITLE_BLANK_LINES,
};
use crate::flow::FlowEngine;
use crate::geometry::{DimensionsFit, Frame, SizedDims};
use crate::layout::Layout;
use crate::panel::cropping::crop_lines_for_resizing;
use crate::panel::{DraftPanel, FullyRenderedPanel};
use crate::width::{display_width, expand_tabs, line_width, soft_wrap_words, wrap_to_width};

/// Measured content of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Lines after wrapping, before any cropping to the frame.
    Text(Arc<[String]>),
    /// Sub-panels after the layout has been fitted to the frame.
    Layout(Layout<DimensionsAwarePanel>),
}

/// A panel that knows its natural size and the size it is cropped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionsAwarePanel {
    draft: DraftPanel,
    body: PanelBody,
    dims: SizedDims,
    cropped_dims: SizedDims,
    title_lines: Vec<String>,
    title_height: u16,
}

impl DimensionsAwarePanel {
    pub(crate) fn measure_text(draft: DraftPanel, text: &str) -> Self {
        let frame = draft.frame;
        let config = draft.config;

        let mut lines: Vec<String> = text
            .lines()
            .map(|line| expand_tabs(line, config.tab_size))
            .collect();
        if config.horizontal_overflow == HorizontalOverflowMode::WordWrap {
            if let Some(width) = frame.width().filter(|width| *width > 0) {
                lines = lines
                    .iter()
                    .flat_map(|line| wrap_to_width(line, usize::from(width), config.tab_size))
                    .collect();
            }
        }

        let visible = crop_lines_for_resizing(lines.clone(), &frame, config.vertical_overflow);
        let width = visible
            .iter()
            .map(|line| line_width(line, config.tab_size))
            .max()
            .unwrap_or(0);
        let dims = SizedDims::new(saturate(width), saturate(visible.len()));

        Self::assemble(draft, PanelBody::Text(lines.into()), dims)
    }

    /// Wrap a layout that has already been fitted to the frame of `draft`.
    pub(crate) fn from_layout(draft: DraftPanel, layout: Layout<DimensionsAwarePanel>) -> Self {
        let dims = layout.calc_dims(draft.config.panel_design, true);
        Self::assemble(draft, PanelBody::Layout(layout), dims)
    }

    fn assemble(draft: DraftPanel, body: PanelBody, dims: SizedDims) -> Self {
        let cropped_dims = draft.frame.crop_dims(dims);
        let max_title_height = max_title_height(&draft.frame, &draft.config, cropped_dims);
        let title_lines = wrap_title(&draft.title, &draft.frame, dims.width, max_title_height);
        let title_height = max_title_height.min(saturate(title_lines.len()));

        Self {
            draft,
            body,
            dims,
            cropped_dims,
            title_lines,
            title_height,
        }
    }

    pub fn draft(&self) -> &DraftPanel {
        &self.draft
    }

    pub fn frame(&self) -> Frame {
        self.draft.frame
    }

    pub fn config(&self) -> &OutputConfig {
        &self.draft.config
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn body(&self) -> &PanelBody {
        &self.body
    }

    /// Natural size of the content, ignoring the frame.
    pub fn dims(&self) -> SizedDims {
        self.dims
    }

    /// Size of the content after cropping to the frame.
    pub fn cropped_dims(&self) -> SizedDims {
        self.cropped_dims
    }

    /// Title wrapped to the panel. May hold more lines than are shown.
    pub fn title_lines(&self) -> &[String] {
        &self.title_lines
    }

    pub fn title_width(&self) -> u16 {
        self.title_lines
            .iter()
            .map(|line| saturate(display_width(line)))
            .max()
            .unwrap_or(0)
    }

    /// Number of title lines shown.
    pub fn title_height(&self) -> u16 {
        self.title_height
    }

    pub fn title_height_with_blank_lines(&self) -> u16 {
        if self.title_height > 0 {
            self.title_height + TITLE_BLANK_LINES
        } else {
            0
        }
    }

    /// Size including the title, as laid out in a parent layout.
    pub fn outer_dims(&self) -> SizedDims {
        let width = if self.title_height > 0 {
            self.cropped_dims.width.max(self.title_width())
        } else {
            self.cropped_dims.width
        };
        let height = self.frame().crop_height(
            self.cropped_dims
                .height
                .saturating_add(self.title_height_with_blank_lines()),
            true,
        );
        SizedDims::new(width, height)
    }

    /// Frame left for the content once the title has taken its lines.
    pub fn inner_frame(&self) -> Frame {
        let frame = self.frame();
        match frame.height() {
            Some(height) if self.title_height > 0 => frame.with_height(Some(
                height.saturating_sub(self.title_height_with_blank_lines()),
            )),
            _ => frame,
        }
    }

    pub fn within_frame(&self) -> DimensionsFit {
        DimensionsFit::new(self.dims, self.inner_frame().dims())
    }

    /// True when the frame leaves no room for even a one-line title above
    /// the cropped content.
    pub fn title_overlaps_panel(&self) -> bool {
        available_height_for_title(&self.frame(), self.cropped_dims)
            .is_some_and(|available| available < i32::from(SINGLE_LINE_TITLE_HEIGHT))
    }

    /// Cropped narrower than the configured minimum crop width.
    pub fn overly_cropped(&self) -> bool {
        self.cropped_dims.width < self.config().min_crop_width
    }

    /// Re-measure the panel under a new frame.
    pub fn with_frame(&self, frame: Frame, engine: &FlowEngine) -> Self {
        if frame == self.frame() {
            return self.clone();
        }
        self.draft.clone().with_frame(frame).render_next_stage(engine)
    }

    pub fn render_next_stage(&self) -> FullyRenderedPanel {
        FullyRenderedPanel::new(self.clone())
    }
}

fn available_height_for_title(frame: &Frame, cropped_dims: SizedDims) -> Option<i32> {
    frame
        .height()
        .map(|height| i32::from(height) - i32::from(cropped_dims.height))
}

fn max_title_height(frame: &Frame, config: &OutputConfig, cropped_dims: SizedDims) -> u16 {
    let auto = match (frame.height(), available_height_for_title(frame, cropped_dims)) {
        (Some(height), Some(available)) => {
            let height = i32::from(height);
            if available >= i32::from(DOUBLE_LINE_TITLE_HEIGHT) {
                2
            } else if available == i32::from(SINGLE_LINE_TITLE_HEIGHT) {
                1
            } else if height - i32::from(DOUBLE_LINE_TITLE_HEIGHT)
                >= i32::from(MIN_PANEL_LINES_FOR_DOUBLE_LINE_TITLE)
            {
                2
            } else if height - i32::from(SINGLE_LINE_TITLE_HEIGHT)
                >= i32::from(MIN_PANEL_LINES_FOR_SINGLE_LINE_TITLE)
            {
                1
            } else {
                0
            }
        }
        _ => 2,
    };
    config.max_title_height.limit(auto)
}

/// Word-wrap a title, starting at the content width and widening until the
/// title fits within the allowed number of lines.
fn wrap_title(title: &str, frame: &Frame, content_width: u16, max_height: u16) -> Vec<String> {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let max_lines = usize::from(max_height.max(1));
    let mut width = usize::from(frame.crop_width(content_width, true));
    loop {
        let lines = soft_wrap_words(&words, width);
        if !lines.is_empty() && lines.len() <= max_lines {
            return lines;
        }
        width += 1;
    }
}

fn saturate(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MaxTitleHeight, VerticalOverflowMode};
    use crate::geometry::Proportionally;

    fn measure(panel: DraftPanel) -> DimensionsAwarePanel {
        panel.render_next_stage(&FlowEngine::default())
    }

    #[test]
    fn text_dims_and_cropping() {
        let frame = Frame::flexible(Some(6), Some(2));
        let panel = measure(DraftPanel::text("short\na longer line\nx").with_frame(frame));
        assert_eq!(panel.dims(), SizedDims::new(13, 3));
        assert_eq!(panel.cropped_dims(), SizedDims::new(6, 2));

        let fixed = measure(DraftPanel::text("ab").with_frame(Frame::fixed(Some(6), Some(4))));
        assert_eq!(fixed.dims(), SizedDims::new(2, 1));
        assert_eq!(fixed.cropped_dims(), SizedDims::new(6, 4));
    }

    #[test]
    fn empty_text_has_zero_dims() {
        let panel = measure(DraftPanel::text(""));
        assert_eq!(panel.dims(), SizedDims::new(0, 0));
        assert_eq!(panel.outer_dims(), SizedDims::new(0, 0));
    }

    #[test]
    fn word_wrap_uses_frame_width() {
        let config =
            OutputConfig::default().with_horizontal_overflow(HorizontalOverflowMode::WordWrap);
        let panel = measure(
            DraftPanel::text("one two three")
                .with_config(config)
                .with_frame(Frame::flexible(Some(7), None)),
        );
        assert_eq!(panel.dims(), SizedDims::new(7, 2));
    }

    #[test]
    fn fixed_height_limits_measured_lines() {
        let text = "ab\nabcdef\nabcdefghij";
        let frame = Frame::flexible(Some(20), None).with_height_fixed(Some(2), true);
        let panel = measure(DraftPanel::text(text).with_frame(frame));
        assert_eq!(panel.dims(), SizedDims::new(6, 2));

        let config = OutputConfig::default().with_vertical_overflow(VerticalOverflowMode::CropTop);
        let panel = measure(DraftPanel::text(text).with_frame(frame).with_config(config));
        assert_eq!(panel.dims(), SizedDims::new(10, 2));

        let panel = measure(DraftPanel::text(text).with_frame(Frame::flexible(Some(20), Some(2))));
        assert_eq!(panel.dims(), SizedDims::new(10, 3));
    }

    #[test]
    fn title_wraps_to_content_width_and_widens_when_needed() {
        let panel = measure(DraftPanel::text("abcdef").with_title("ab cd ef gh"));
        assert_eq!(panel.title_lines(), ["ab cd", "ef gh"]);
        assert_eq!(panel.title_width(), 5);
        assert_eq!(panel.title_height(), 2);
        assert_eq!(panel.title_height_with_blank_lines(), 3);
        assert_eq!(panel.outer_dims(), SizedDims::new(6, 4));

        let panel = measure(DraftPanel::text("ab").with_title("a much longer title"));
        assert_eq!(panel.title_height(), 2);
        assert_eq!(panel.title_lines(), ["a much", "longer title"]);
        assert_eq!(panel.title_width(), 12);
        assert_eq!(panel.outer_dims().width, 12);
    }

    #[test]
    fn title_height_follows_frame_height() {
        let lines = "a\nb\nc\nd\ne";
        let panel = measure(
            DraftPanel::text(lines)
                .with_title("some title")
                .with_frame(Frame::flexible(None, Some(7))),
        );
        assert_eq!(panel.title_height(), 1);

        let panel = measure(
            DraftPanel::text("x")
                .with_title("some title")
                .with_frame(Frame::flexible(None, Some(3))),
        );
        assert_eq!(panel.title_height(), 1);

        let panel = measure(
            DraftPanel::text(lines)
                .with_title("some title")
                .with_frame(Frame::flexible(None, Some(3))),
        );
        assert_eq!(panel.title_height(), 0);
        assert!(panel.title_overlaps_panel());

        let config = OutputConfig::default().with_max_title_height(MaxTitleHeight::Zero);
        let panel = measure(DraftPanel::text("x").with_title("title").with_config(config));
        assert_eq!(panel.title_height(), 0);
        assert_eq!(panel.title_width(), 5);
        assert_eq!(panel.outer_dims(), SizedDims::new(1, 1));
    }

    #[test]
    fn inner_frame_and_fit() {
        let panel = measure(
            DraftPanel::text("abc\ndef")
                .with_title("t")
                .with_frame(Frame::flexible(Some(5), Some(6))),
        );
        assert_eq!(panel.inner_frame().height(), Some(4));
        let fit = panel.within_frame();
        assert_eq!(fit.width, Some(true));
        assert_eq!(fit.height, Some(true));
        assert_eq!(fit.proportionality, Some(Proportionally::Wider));
    }

    #[test]
    fn overly_cropped_compares_cropped_width_with_minimum() {
        let config = OutputConfig::default().with_min_crop_width(3);
        let cropped = measure(
            DraftPanel::text("abcdef")
                .with_config(config)
                .with_frame(Frame::flexible(Some(2), None)),
        );
        assert!(cropped.overly_cropped());

        let narrow = measure(DraftPanel::text("ab").with_config(config));
        assert!(narrow.overly_cropped());

        let empty = measure(
            DraftPanel::text("")
                .with_config(config)
                .with_frame(Frame::flexible(Some(0), None)),
        );
        assert!(empty.overly_cropped());

        let wide_enough = measure(
            DraftPanel::text("abcdef")
                .with_config(config)
                .with_frame(Frame::flexible(Some(3), None)),
        );
        assert!(!wide_enough.overly_cropped());
    }

    #[test]
    fn tabs_are_expanded_before_measuring() {
        let panel = measure(DraftPanel::text("a\tb\nx"));
        assert_eq!(panel.dims(), SizedDims::new(5, 2));
        match panel.body() {
            PanelBody::Text(lines) => assert_eq!(&lines[..], ["a   b", "x"]),
            PanelBody::Layout(_) => panic!("expected text body"),
        }

        let config = OutputConfig {
            tab_size: 8,
            ..OutputConfig::default()
        };
        let panel = measure(DraftPanel::text("a\tb").with_config(config));
        assert_eq!(panel.dims().width, 9);
    }

    #[test]
    fn with_frame_remeasures() {
        let engine = FlowEngine::default();
        let panel = measure(DraftPanel::text("abcdef"));
        let narrowed = panel.with_frame(Frame::flexible(Some(3), None), &engine);
        assert_eq!(narrowed.cropped_dims().width, 3);
        assert_eq!(narrowed.dims(), panel.dims());
        assert_eq!(narrowed.with_frame(narrowed.frame(), &engine), narrowed);
    }
}
