//! Shared style definitions for TUI components.

use ratatui::style::{Color, Modifier, Style};

// === Border Styles ===

/// Border style for focused components.
pub const BORDER_FOCUSED: Style = Style::new().fg(Color::Cyan);

/// Border style for unfocused components.
pub const BORDER_UNFOCUSED: Style = Style::new().fg(Color::DarkGray);

/// Get border style based on focus state.
#[inline]
pub fn border_style(focused: bool) -> Style {
    if focused {
        BORDER_FOCUSED
    } else {
        BORDER_UNFOCUSED
    }
}

// === Table Styles ===

/// Style for table header text.
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Header cell of a primary-key column.
pub fn primary_key_header_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Locked columns get a tinted background so they read as pinned.
pub fn locked_column_style() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 46))
}

/// Style for table row when selected/highlighted.
pub fn row_highlight_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// The cell under the cursor inside the highlighted row.
pub fn cell_cursor_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// NULL cells are grey and italic.
pub const NULL_STYLE: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);

/// Default highlight symbol for table selection.
pub const HIGHLIGHT_SYMBOL: &str = "► ";

// === Text Styles ===

/// Style for dimmed/hint text.
pub const TEXT_DIM: Style = Style::new().fg(Color::DarkGray);

/// Style for warning/loading text.
pub const TEXT_WARNING: Style = Style::new().fg(Color::Yellow);

/// Style for error text.
pub const TEXT_ERROR: Style = Style::new().fg(Color::Red);

/// Style for success text.
pub const TEXT_SUCCESS: Style = Style::new().fg(Color::Green);

/// Style for key hints.
pub const KEY_HINT: Style = Style::new().fg(Color::Yellow);

// === Modal Styles ===

/// Style for selected items in lists.
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for input text.
pub fn input_text_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_style_focused() {
        let style = border_style(true);
        assert_eq!(style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_border_style_unfocused() {
        let style = border_style(false);
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_row_highlight_style() {
        let style = row_highlight_style();
        assert_eq!(style.bg, Some(Color::Cyan));
        assert_eq!(style.fg, Some(Color::Black));
    }

    #[test]
    fn test_null_style_is_italic() {
        assert!(NULL_STYLE.add_modifier.contains(Modifier::ITALIC));
    }
}
