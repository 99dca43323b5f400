use unicode_width::UnicodeWidthChar;

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Display width of a single line, expanding tabs to the next tab stop.
///
/// Escape sequences are stripped per tab-separated segment, so the tabs
/// themselves survive the stripping.
pub fn line_width(line: &str, tab_size: u16) -> usize {
    let tab = usize::from(tab_size.max(1));
    let mut segments = line.split('\t');
    let mut width = segments.next().map_or(0, display_width);
    for segment in segments {
        width += tab - width % tab;
        width += display_width(segment);
    }
    width
}

/// Replace every tab with the spaces up to the next tab stop.
pub fn expand_tabs(line: &str, tab_size: u16) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let tab = usize::from(tab_size.max(1));
    let mut out = String::with_capacity(line.len() + tab);
    let mut width = 0;
    for (index, segment) in line.split('\t').enumerate() {
        if index > 0 {
            let fill = tab - width % tab;
            out.extend(std::iter::repeat_n(' ', fill));
            width += fill;
        }
        out.push_str(segment);
        width += display_width(segment);
    }
    out
}

fn char_width(ch: char, current: usize, tab_size: u16) -> usize {
    if ch == '\t' {
        let tab = usize::from(tab_size.max(1));
        tab - current % tab
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Longest prefix of `line` that fits in `width` columns. The flag reports
/// whether anything was cut off.
pub fn truncate_to_width(line: &str, width: usize, tab_size: u16) -> (String, bool) {
    let mut used = 0;
    let mut out = String::new();
    for ch in line.chars() {
        let w = char_width(ch, used, tab_size);
        if used + w > width {
            return (out, true);
        }
        used += w;
        out.push(ch);
    }
    (out, false)
}

/// Hard-wrap one line of text into chunks no wider than `width` columns.
pub fn wrap_to_width(line: &str, width: usize, tab_size: u16) -> Vec<String> {
    if width == 0 || line.is_empty() {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for ch in line.chars() {
        if current.is_empty() && ch == ' ' && !lines.is_empty() {
            continue;
        }
        let w = char_width(ch, used, tab_size);
        if used + w > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
            if ch == ' ' {
                continue;
            }
        }
        used += char_width(ch, used, tab_size);
        current.push(ch);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Distribute words over lines no wider than `max_width`. A single word
/// wider than `max_width` is kept whole on its own line.
pub fn soft_wrap_words(words: &[&str], max_width: usize) -> Vec<String> {
    let mut lines: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_width = 0;

    for &word in words {
        let space = usize::from(!current.is_empty());
        current_width += display_width(word) + space;
        current.push(word);

        if current.len() > 1 && current_width > max_width {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(word);
            current_width = display_width(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.into_iter().map(|line| line.join(" ")).collect()
}
