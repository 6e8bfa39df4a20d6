//! Status bar component.
//!
//! Displays keybindings plus the latest status message or notification.

use crossterm::event::KeyEvent;
use gridlens_core::sinks::Notification;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use super::styles::{KEY_HINT, TEXT_DIM, TEXT_ERROR, TEXT_SUCCESS};

/// Key binding display item.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyBinding {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StatusMessage {
    Plain(String),
    Notice(Notification),
}

/// Status bar showing keybindings and messages.
pub struct StatusBar {
    message: Option<StatusMessage>,
    bindings: Vec<KeyBinding>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    /// Create a new status bar with default keybindings.
    pub fn new() -> Self {
        Self {
            message: None,
            bindings: vec![
                KeyBinding::new("Tab", "Focus"),
                KeyBinding::new("n/p", "Page"),
                KeyBinding::new("/", "Search"),
                KeyBinding::new(":", "SQL"),
                KeyBinding::new("y", "Copy"),
                KeyBinding::new("?", "Help"),
                KeyBinding::new("q", "Quit"),
            ],
        }
    }

    /// Set a status message. An empty message clears the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message = if message.is_empty() {
            None
        } else {
            Some(StatusMessage::Plain(message))
        };
    }

    /// Show an engine notification until the next message replaces it.
    pub fn notify(&mut self, notification: Notification) {
        self.message = Some(StatusMessage::Notice(notification));
    }

    /// Text currently shown after the bindings.
    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().map(|m| match m {
            StatusMessage::Plain(text) => text.clone(),
            StatusMessage::Notice(n) => format!("{}: {}", n.title, n.description),
        })
    }

    fn message_style(&self) -> Style {
        match &self.message {
            Some(StatusMessage::Notice(n)) if n.is_error => {
                TEXT_ERROR.add_modifier(Modifier::BOLD)
            }
            _ => TEXT_SUCCESS,
        }
    }
}

impl Component for StatusBar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let mut spans: Vec<Span> = Vec::new();

        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", TEXT_DIM));
            }
            spans.push(Span::styled(format!(" {} ", binding.key), KEY_HINT));
            spans.push(Span::raw(binding.action));
        }

        if let Some(text) = self.message_text() {
            spans.push(Span::styled(" │ ", TEXT_DIM));
            spans.push(Span::styled(text, self.message_style()));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(TEXT_DIM),
        );

        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        false
    }
}
