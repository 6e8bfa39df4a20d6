//! Placeholder rendering for panels that are not showing data yet.
//!
//! Covers both the app-level [`LoadState`] (table list) and the engine's
//! [`LoadStatus`] (grid).

use gridlens_core::grid::LoadStatus;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::styles::{TEXT_DIM, TEXT_ERROR, TEXT_WARNING, border_style};
use crate::service::LoadState;

/// Configuration for rendering placeholder views.
pub struct LoadStateConfig<'a> {
    /// Title for the view
    pub title: &'a str,
    /// Message shown in Idle state
    pub idle_message: &'a str,
    /// Message shown in Loading state
    pub loading_message: &'a str,
    /// Border style based on focus state
    pub border_style: Style,
}

impl<'a> LoadStateConfig<'a> {
    pub fn new(title: &'a str, focused: bool) -> Self {
        Self {
            title,
            idle_message: "Press 'r' to load data",
            loading_message: "Loading...",
            border_style: border_style(focused),
        }
    }

    pub fn with_idle_message(mut self, message: &'a str) -> Self {
        self.idle_message = message;
        self
    }

    pub fn with_loading_message(mut self, message: &'a str) -> Self {
        self.loading_message = message;
        self
    }
}

fn render_message(frame: &mut Frame, area: Rect, config: &LoadStateConfig<'_>, lines: Vec<Line>) {
    let mut content = vec![Line::from("")];
    content.extend(lines);
    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(config.title)
            .borders(Borders::ALL)
            .border_style(config.border_style),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_idle(frame: &mut Frame, area: Rect, config: &LoadStateConfig<'_>) {
    let line = Line::from(Span::styled(format!("  {}", config.idle_message), TEXT_DIM));
    render_message(frame, area, config, vec![line]);
}

pub fn render_loading(frame: &mut Frame, area: Rect, config: &LoadStateConfig<'_>) {
    let line = Line::from(Span::styled(
        format!("  ⏳ {}", config.loading_message),
        TEXT_WARNING,
    ));
    render_message(frame, area, config, vec![line]);
}

/// Render the error state with message and retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, config: &LoadStateConfig<'_>, error_msg: &str) {
    let lines = vec![
        Line::from(Span::styled(format!("  ❌ Error: {}", error_msg), TEXT_ERROR)),
        Line::from(""),
        Line::from(Span::styled("  Press 'r' to retry", TEXT_DIM)),
    ];
    render_message(frame, area, config, lines);
}

pub fn render_empty(
    frame: &mut Frame,
    area: Rect,
    config: &LoadStateConfig<'_>,
    empty_message: &str,
) {
    let line = Line::from(Span::styled(format!("  {}", empty_message), TEXT_DIM));
    render_message(frame, area, config, vec![line]);
}

/// Render the non-Loaded states (Idle, Loading, Error) for a LoadState.
/// Returns true if the state was handled (not Loaded), false if Loaded.
///
/// Usage:
/// ```ignore
/// if render_non_loaded_state(frame, area, &self.state, &config) {
///     return;
/// }
/// // Handle Loaded case here
/// ```
pub fn render_non_loaded_state<T>(
    frame: &mut Frame,
    area: Rect,
    state: &LoadState<T>,
    config: &LoadStateConfig<'_>,
) -> bool {
    match state {
        LoadState::Idle => {
            render_idle(frame, area, config);
            true
        }
        LoadState::Loading => {
            render_loading(frame, area, config);
            true
        }
        LoadState::Error(msg) => {
            render_error(frame, area, config, msg);
            true
        }
        LoadState::Loaded(_) => false,
    }
}

/// Grid counterpart of [`render_non_loaded_state`]. Returns false only when
/// rows are ready to draw.
pub fn render_grid_status(
    frame: &mut Frame,
    area: Rect,
    status: &LoadStatus,
    config: &LoadStateConfig<'_>,
    empty_message: Option<&str>,
) -> bool {
    match status {
        LoadStatus::Idle => render_idle(frame, area, config),
        LoadStatus::Loading => render_loading(frame, area, config),
        LoadStatus::Error(msg) => render_error(frame, area, config, msg),
        LoadStatus::Empty => {
            render_empty(frame, area, config, empty_message.unwrap_or("No data available."))
        }
        LoadStatus::Ready => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, style::Color};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_load_state_config_new() {
        let config = LoadStateConfig::new(" Test ", true);
        assert_eq!(config.title, " Test ");
        assert_eq!(config.idle_message, "Press 'r' to load data");
        assert_eq!(config.loading_message, "Loading...");
        assert_eq!(config.border_style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_load_state_config_with_messages() {
        let config = LoadStateConfig::new(" Test ", false)
            .with_idle_message("Custom idle")
            .with_loading_message("Custom loading");
        assert_eq!(config.idle_message, "Custom idle");
        assert_eq!(config.loading_message, "Custom loading");
        assert_eq!(config.border_style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_grid_status_ready_draws_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        let config = LoadStateConfig::new(" Grid ", true);
        let mut handled = true;
        terminal
            .draw(|f| {
                handled = render_grid_status(f, f.area(), &LoadStatus::Ready, &config, None);
            })
            .unwrap();
        assert!(!handled);
    }

    #[test]
    fn test_grid_status_empty_shows_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        let config = LoadStateConfig::new(" Grid ", true);
        terminal
            .draw(|f| {
                render_grid_status(
                    f,
                    f.area(),
                    &LoadStatus::Empty,
                    &config,
                    Some("No data found matching your search."),
                );
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("No data found matching your search."));
    }
}
