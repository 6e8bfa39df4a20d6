//! Help overlay component.
//!
//! Displays a modal overlay showing all available keybindings.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use super::styles::TEXT_DIM;

/// Help overlay showing keybindings.
pub struct HelpOverlay;

impl HelpOverlay {
    const GLOBAL_KEYS: &'static [(&'static str, &'static str)] = &[
        ("q / Ctrl+C", "Quit application"),
        ("Tab", "Switch between table list and grid"),
        ("r", "Reload current page"),
        ("?", "Toggle help"),
    ];

    const GRID_KEYS: &'static [(&'static str, &'static str)] = &[
        ("↑↓ / jk", "Move row"),
        ("←→ / hl", "Move column"),
        ("n / p", "Next / previous page"),
        ("g / G", "First / last page"),
        ("s", "Cycle sort on column"),
        ("/", "Search table"),
        (":", "Run SQL"),
        ("b", "Back to table browsing"),
        ("L", "Lock / unlock column"),
        ("Enter", "Inspect cell"),
    ];

    const COPY_KEYS: &'static [(&'static str, &'static str)] = &[
        ("y", "Copy row (tab-separated)"),
        ("Y", "Copy column"),
        ("c", "Copy row or page as TSV / CSV / JSON"),
    ];

    /// Render the help overlay centered on screen.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = vec![Line::from("")];
        Self::push_section(&mut lines, "Global", Self::GLOBAL_KEYS);
        Self::push_section(&mut lines, "Grid", Self::GRID_KEYS);
        Self::push_section(&mut lines, "Copy", Self::COPY_KEYS);
        lines.push(Line::from(Span::styled("  Press ? or Esc to close", TEXT_DIM)));

        let help_text = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(help_text, popup_area);
    }

    fn push_section(lines: &mut Vec<Line<'static>>, title: &'static str, keys: &[(&str, &str)]) {
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from("  ──────────────────────────────────"));
        for (key, action) in keys {
            lines.push(Self::format_keybinding(key, action));
        }
        lines.push(Line::from(""));
    }

    /// Format a single keybinding line.
    fn format_keybinding(key: &str, action: &str) -> Line<'static> {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("{:<14}", key),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(action.to_string()),
        ])
    }
}
