//! One-line input prompt for the search term and ad-hoc SQL.
//!
//! Drawn over the bottom of the grid while active.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::styles::input_text_style;
use crate::layout::INPUT_BAR_HEIGHT;

/// What the typed text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Search,
    Sql,
}

impl InputKind {
    fn title(self) -> &'static str {
        match self {
            InputKind::Search => " Search (Enter apply, Esc cancel) ",
            InputKind::Sql => " SQL (Enter run, Esc cancel) ",
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            InputKind::Search => " / ",
            InputKind::Sql => " : ",
        }
    }

    fn color(self) -> Color {
        match self {
            InputKind::Search => Color::Green,
            InputKind::Sql => Color::Magenta,
        }
    }
}

/// Result of a key press while the prompt is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Still editing
    Editing,
    Submit(InputKind, String),
    Cancel,
}

/// Prompt state. Closed when `kind` is `None`.
#[derive(Debug, Default)]
pub struct InputBar {
    kind: Option<InputKind>,
    text: String,
}

impl InputBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Open the prompt pre-filled with `initial`.
    pub fn open(&mut self, kind: InputKind, initial: &str) {
        self.kind = Some(kind);
        self.text = initial.to_string();
    }

    pub fn close(&mut self) {
        self.kind = None;
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        let Some(kind) = self.kind else {
            return InputEvent::Cancel;
        };
        match key.code {
            KeyCode::Enter => {
                let text = match kind {
                    InputKind::Search => self.text.clone(),
                    InputKind::Sql => self.text.trim().to_string(),
                };
                self.close();
                return InputEvent::Submit(kind, text);
            }
            KeyCode::Esc => {
                self.close();
                return InputEvent::Cancel;
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
            }
            _ => {}
        }
        InputEvent::Editing
    }

    /// Render at the bottom of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(kind) = self.kind else {
            return;
        };
        let bar_y = area.y + area.height.saturating_sub(INPUT_BAR_HEIGHT);
        let bar_area = Rect::new(area.x, bar_y, area.width, INPUT_BAR_HEIGHT.min(area.height));
        frame.render_widget(Clear, bar_area);

        let line = Line::from(vec![
            Span::styled(kind.prompt(), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}_", self.text), input_text_style()),
        ]);
        let paragraph = Paragraph::new(line)
            .block(
                Block::default()
                    .title(kind.title())
                    .title_style(
                        Style::default()
                            .fg(kind.color())
                            .add_modifier(Modifier::BOLD),
                    )
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(kind.color())),
            )
            .style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, bar_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_submit() {
        let mut bar = InputBar::new();
        bar.open(InputKind::Search, "an");
        bar.handle_key(key(KeyCode::Char('n')));
        bar.handle_key(key(KeyCode::Char('x')));
        bar.handle_key(key(KeyCode::Backspace));
        assert_eq!(bar.text(), "ann");
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter)),
            InputEvent::Submit(InputKind::Search, "ann".to_string())
        );
        assert!(!bar.is_active());
    }

    #[test]
    fn test_search_keeps_whitespace_sql_trims() {
        let mut bar = InputBar::new();
        bar.open(InputKind::Search, " a ");
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter)),
            InputEvent::Submit(InputKind::Search, " a ".to_string())
        );

        bar.open(InputKind::Sql, "  SELECT 1 ");
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter)),
            InputEvent::Submit(InputKind::Sql, "SELECT 1".to_string())
        );
    }

    #[test]
    fn test_escape_and_clear() {
        let mut bar = InputBar::new();
        bar.open(InputKind::Sql, "SELECT");
        bar.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(bar.text(), "");
        assert_eq!(bar.handle_key(key(KeyCode::Esc)), InputEvent::Cancel);
        assert!(!bar.is_active());
    }
}
