use std::io::Write;

use crate::config::{PanelDesign, TITLE_BLANK_LINES};
use crate::error::Result;
use crate::layout::Layout;
use crate::panel::{DimensionsAwarePanel, FullyRenderedPanel};
use crate::width::{line_width, truncate_to_width};

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    /// Zero-based row and column of the top-left corner.
    pub origin: (u16, u16),
    pub restore_cursor: Option<(u16, u16)>,
}

/// ANSI escape code renderer writing a rendered panel to a terminal handle.
pub struct AnsiRenderer {
    settings: RendererSettings,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    pub fn render(&mut self, writer: &mut impl Write, panel: &FullyRenderedPanel) -> Result<()> {
        let (row, col) = self.settings.origin;
        for (offset, line) in panel.lines().iter().enumerate() {
            let offset = u16::try_from(offset).unwrap_or(u16::MAX);
            write!(
                writer,
                "\x1b[{};{}H",
                row.saturating_add(offset).saturating_add(1),
                col.saturating_add(1)
            )?;
            write!(writer, "{}", line)?;
        }

        if let Some((row, col)) = self.settings.restore_cursor {
            write!(
                writer,
                "\x1b[{};{}H",
                row.saturating_add(1),
                col.saturating_add(1)
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Write the lines of a rendered panel, one per output line.
pub fn write_lines(writer: &mut impl Write, panel: &FullyRenderedPanel) -> Result<()> {
    for line in panel.lines() {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pad `line` with spaces to exactly `width` columns, cutting any overshoot.
pub fn pad_line(line: &str, width: usize, tab_size: u16) -> String {
    let mut padded = if line_width(line, tab_size) > width {
        truncate_to_width(line, width, tab_size).0
    } else {
        line.to_string()
    };
    let display = line_width(&padded, tab_size);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(display)));
    padded
}

/// Compose a layout of measured panels into a single-row table.
///
/// Each column is as wide as the panel's outer width and holds the title,
/// a blank line and the rendered content, cut to the panel's outer height.
pub fn render_table(layout: &Layout<DimensionsAwarePanel>, design: PanelDesign) -> Vec<String> {
    if layout.is_empty() {
        return vec![String::new()];
    }

    match design {
        PanelDesign::Table => table_lines(layout),
    }
}

fn table_lines(layout: &Layout<DimensionsAwarePanel>) -> Vec<String> {
    let columns: Vec<(usize, Vec<String>)> = layout.values().map(column).collect();
    let rows = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(rows + 2);
    lines.push(border(&columns, '┌', '┬', '┐'));
    for row in 0..rows {
        let mut line = String::from("│");
        for (width, cells) in &columns {
            line.push(' ');
            match cells.get(row) {
                Some(cell) => line.push_str(cell),
                None => line.extend(std::iter::repeat_n(' ', *width)),
            }
            line.push_str(" │");
        }
        lines.push(line);
    }
    lines.push(border(&columns, '└', '┴', '┘'));
    lines
}

fn column(panel: &DimensionsAwarePanel) -> (usize, Vec<String>) {
    let outer = panel.outer_dims();
    let title_height = usize::from(panel.title_height());

    let mut cells: Vec<String> = panel
        .title_lines()
        .iter()
        .take(title_height)
        .cloned()
        .collect();
    if title_height > 0 {
        cells.extend(std::iter::repeat_n(String::new(), usize::from(TITLE_BLANK_LINES)));
    }
    cells.extend(panel.render_next_stage().lines().iter().cloned());
    cells.truncate(usize::from(outer.height));

    let width = usize::from(outer.width);
    let tab_size = panel.config().tab_size;
    let cells = cells
        .iter()
        .map(|cell| pad_line(cell, width, tab_size))
        .collect();
    (width, cells)
}

fn border(columns: &[(usize, Vec<String>)], left: char, middle: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (index, (width, _)) in columns.iter().enumerate() {
        if index > 0 {
            line.push(middle);
        }
        line.extend(std::iter::repeat_n('─', width + 2));
    }
    line.push(right);
    line
}
