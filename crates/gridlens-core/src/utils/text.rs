//! Terminal-width text helpers.
//!
//! The engine truncates by character count; these work in display columns so
//! wide (CJK, emoji) characters line up in a terminal grid.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Collapse line breaks and tabs so a value fits on one grid line.
pub fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r', '\t']) {
        return text.to_string();
    }
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\t', " ")
}

/// Truncate to `max_width` display columns, ending in `...` when cut.
///
/// # Examples
/// ```
/// use gridlens_core::utils::text::truncate_text_unicode;
/// assert_eq!(truncate_text_unicode("Hello World!", 8), "Hello...");
/// ```
pub fn truncate_text_unicode(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.width();
    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - text_width))
    }
}

/// Truncate then pad: exactly `width` display columns for plain-width text.
pub fn fit_to_width(text: &str, width: usize) -> String {
    pad_to_width(&truncate_text_unicode(&single_line(text), width), width)
}
