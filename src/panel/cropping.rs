//! Line cropping used when measuring and rendering text panels.

use crate::config::{HorizontalOverflowMode, VerticalOverflowMode};
use crate::geometry::Frame;
use crate::width::{line_width, truncate_to_width};

const ELLIPSIS: &str = "…";

/// Lines that decide the width of a panel being resized.
///
/// A panel with a flexible width but a fixed height that is shorter than
/// the content is only as wide as the lines it can show. In every other
/// case all lines count, including those outside the frame.
pub fn crop_lines_for_resizing(
    lines: Vec<String>,
    frame: &Frame,
    mode: VerticalOverflowMode,
) -> Vec<String> {
    match (frame.width(), frame.height()) {
        (Some(width), Some(height))
            if frame.fixed_width() == Some(false)
                && frame.is_height_fixed()
                && width > 0
                && usize::from(height) < lines.len() =>
        {
            crop_lines_vertically(lines, Some(height), mode)
        }
        _ => lines,
    }
}

pub fn crop_lines_vertically(
    mut lines: Vec<String>,
    height: Option<u16>,
    mode: VerticalOverflowMode,
) -> Vec<String> {
    let Some(height) = height.map(usize::from) else {
        return lines;
    };
    if lines.len() <= height {
        return lines;
    }
    if height == 0 {
        return Vec::new();
    }

    match mode {
        VerticalOverflowMode::CropBottom => {
            lines.truncate(height);
            lines
        }
        VerticalOverflowMode::CropTop => lines.split_off(lines.len() - height),
        VerticalOverflowMode::EllipsisBottom => {
            lines.truncate(height - 1);
            lines.push(ELLIPSIS.to_string());
            lines
        }
        VerticalOverflowMode::EllipsisTop => {
            let mut kept = lines.split_off(lines.len() - (height - 1));
            kept.insert(0, ELLIPSIS.to_string());
            kept
        }
    }
}

pub fn crop_line_horizontally(
    line: &str,
    width: Option<u16>,
    mode: HorizontalOverflowMode,
    tab_size: u16,
) -> String {
    let Some(width) = width.map(usize::from) else {
        return line.to_string();
    };
    if line_width(line, tab_size) <= width {
        return line.to_string();
    }

    match mode {
        HorizontalOverflowMode::Ellipsis => match width {
            0 => String::new(),
            1 => ELLIPSIS.to_string(),
            _ => {
                let (mut cropped, _) = truncate_to_width(line, width - 1, tab_size);
                cropped.push_str(ELLIPSIS);
                cropped
            }
        },
        HorizontalOverflowMode::Crop | HorizontalOverflowMode::WordWrap => {
            truncate_to_width(line, width, tab_size).0
        }
    }
}
