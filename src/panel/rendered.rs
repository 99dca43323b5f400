use crate::geometry::SizedDims;
use crate::panel::cropping::{crop_line_horizontally, crop_lines_vertically};
use crate::panel::{DimensionsAwarePanel, PanelBody};
use crate::render::{pad_line, render_table};

/// A panel with its final text, sized to its cropped dims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullyRenderedPanel {
    measured: DimensionsAwarePanel,
    lines: Vec<String>,
}

impl FullyRenderedPanel {
    pub(crate) fn new(measured: DimensionsAwarePanel) -> Self {
        let cropped = measured.cropped_dims();
        let lines = match measured.body() {
            PanelBody::Text(lines) => render_text(&measured, lines, cropped),
            PanelBody::Layout(layout) => {
                let table = render_table(layout, measured.config().panel_design);
                fit_lines(table, &measured, cropped)
            }
        };
        Self { measured, lines }
    }

    pub fn measured(&self) -> &DimensionsAwarePanel {
        &self.measured
    }

    /// Rendered lines, each exactly as wide as the cropped width.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rendered lines joined into a single plain string.
    pub fn plain(&self) -> String {
        self.lines.join("\n")
    }

    /// Same as [`plain`](Self::plain) with terminal line endings.
    pub fn terminal(&self) -> String {
        self.lines.join("\r\n")
    }

    /// Content hash of the rendered text.
    pub fn fingerprint(&self) -> String {
        blake3::hash(self.plain().as_bytes()).to_hex().to_string()
    }
}

fn render_text(
    measured: &DimensionsAwarePanel,
    lines: &[String],
    cropped: SizedDims,
) -> Vec<String> {
    let config = measured.config();
    let visible = crop_lines_vertically(
        lines.to_vec(),
        Some(cropped.height),
        config.vertical_overflow,
    );
    let width = Some(cropped.width);
    let cropped_lines = visible
        .iter()
        .map(|line| {
            crop_line_horizontally(line, width, config.horizontal_overflow, config.tab_size)
        })
        .collect();
    fit_lines(cropped_lines, measured, cropped)
}

/// Crop and pad lines to exactly `dims`.
fn fit_lines(
    mut lines: Vec<String>,
    measured: &DimensionsAwarePanel,
    dims: SizedDims,
) -> Vec<String> {
    let tab_size = measured.config().tab_size;
    lines.truncate(usize::from(dims.height));
    lines.resize(usize::from(dims.height), String::new());
    lines
        .iter()
        .map(|line| {
            let cropped = crop_line_horizontally(
                line,
                Some(dims.width),
                crate::config::HorizontalOverflowMode::Crop,
                tab_size,
            );
            pad_line(&cropped, usize::from(dims.width), tab_size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, VerticalOverflowMode};
    use crate::flow::FlowEngine;
    use crate::geometry::Frame;
    use crate::panel::DraftPanel;

    fn render(panel: DraftPanel) -> FullyRenderedPanel {
        panel.render_next_stage(&FlowEngine::default()).render_next_stage()
    }

    #[test]
    fn text_is_cropped_with_ellipsis_and_padded() {
        let panel = render(
            DraftPanel::text("abcdef\nab\nxyz").with_frame(Frame::flexible(Some(4), Some(2))),
        );
        assert_eq!(panel.lines(), ["abc…", "ab  "]);
    }

    #[test]
    fn fixed_frame_pads_to_frame() {
        let panel = render(DraftPanel::text("ab").with_frame(Frame::fixed(Some(3), Some(2))));
        assert_eq!(panel.lines(), ["ab ", "   "]);
    }

    #[test]
    fn vertical_ellipsis() {
        let config =
            OutputConfig::default().with_vertical_overflow(VerticalOverflowMode::EllipsisTop);
        let panel = render(
            DraftPanel::text("a\nb\nc")
                .with_config(config)
                .with_frame(Frame::flexible(None, Some(2))),
        );
        assert_eq!(panel.lines(), ["…", "c"]);
    }

    #[test]
    fn fingerprint_tracks_text() {
        let first = render(DraftPanel::text("same"));
        let second = render(DraftPanel::text("same"));
        let third = render(DraftPanel::text("other"));
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_ne!(first.fingerprint(), third.fingerprint());
        assert_eq!(first.plain(), "same");
    }
}
