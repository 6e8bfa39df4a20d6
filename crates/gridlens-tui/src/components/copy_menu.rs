//! Copy menu modal component.
//!
//! Picks a format (TSV, CSV, JSON) and a scope (selected row or whole page)
//! for a clipboard copy.

use crossterm::event::KeyCode;
use gridlens_core::export::CopyFormat;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use super::styles::{KEY_HINT, TEXT_DIM, selected_style};

/// What gets copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyScope {
    #[default]
    Row,
    Page,
}

impl CopyScope {
    fn toggle(self) -> Self {
        match self {
            CopyScope::Row => CopyScope::Page,
            CopyScope::Page => CopyScope::Row,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CopyScope::Row => "Selected row",
            CopyScope::Page => "Whole page",
        }
    }
}

/// Result of a key press inside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMenuEvent {
    /// Keep the menu open
    Pending,
    Copy(CopyScope, CopyFormat),
    Cancel,
}

/// Copy menu state for format selection.
#[derive(Debug, Default)]
pub struct CopyMenu {
    selected: usize,
    scope: CopyScope,
}

impl CopyMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_format(&self) -> CopyFormat {
        CopyFormat::ALL[self.selected]
    }

    pub fn scope(&self) -> CopyScope {
        self.scope
    }

    pub fn handle_key(&mut self, code: KeyCode) -> CopyMenuEvent {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            // 'j' is the JSON shortcut, so only the arrow moves down
            KeyCode::Down => {
                if self.selected + 1 < CopyFormat::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Tab | KeyCode::Char('a') => {
                self.scope = self.scope.toggle();
            }
            KeyCode::Enter => return CopyMenuEvent::Copy(self.scope, self.selected_format()),
            KeyCode::Esc | KeyCode::Char('q') => return CopyMenuEvent::Cancel,
            KeyCode::Char(c) => {
                if let Some(format) = CopyFormat::ALL.iter().find(|f| f.key() == c) {
                    return CopyMenuEvent::Copy(self.scope, *format);
                }
            }
            _ => {}
        }
        CopyMenuEvent::Pending
    }

    /// Render the copy menu as a centered overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup_area);

        let section = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line> = vec![
            Line::from(""),
            Line::from(Span::styled("  Format:", section)),
        ];

        for (i, format) in CopyFormat::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let prefix = if is_selected { "  ► " } else { "    " };
            let style = if is_selected {
                selected_style()
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("[{}] ", format.key()), KEY_HINT),
                Span::styled(format.label(), style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  [", TEXT_DIM),
            Span::styled("Tab", KEY_HINT),
            Span::styled("] Scope: ", TEXT_DIM),
            Span::styled(self.scope.label(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  [", TEXT_DIM),
            Span::styled("↑↓", KEY_HINT),
            Span::styled(" Move] [", TEXT_DIM),
            Span::styled("Enter", KEY_HINT),
            Span::styled(" Copy] [", TEXT_DIM),
            Span::styled("Esc", KEY_HINT),
            Span::styled(" Cancel]", TEXT_DIM),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Copy ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, popup_area);
    }
}
