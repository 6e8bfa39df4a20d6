//! Cell viewer overlay.
//!
//! Shows the full, untruncated value of one cell. JSON-looking text is
//! pretty-printed; everything else is shown verbatim and wrapped.

use gridlens_core::grid::CellInspection;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use super::styles::{KEY_HINT, TEXT_DIM};

/// Full-value view of one inspected cell.
pub struct CellViewer {
    inspection: CellInspection,
    body: String,
    scroll: u16,
}

impl CellViewer {
    pub fn new(inspection: CellInspection) -> Self {
        let body = inspection.body();
        Self {
            inspection,
            body,
            scroll: 0,
        }
    }

    pub fn inspection(&self) -> &CellInspection {
        &self.inspection
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(self.body.lines().count()).unwrap_or(u16::MAX);
        if self.scroll + 1 < max {
            self.scroll += 1;
        }
    }

    /// Render the viewer centered on screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("  {}", self.inspection.label()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(self.body.lines().map(|l| Line::from(l.to_string())));

        let help = Line::from(vec![
            Span::styled(" [", TEXT_DIM),
            Span::styled("↑↓/jk", KEY_HINT),
            Span::styled(" Scroll] [", TEXT_DIM),
            Span::styled("c", KEY_HINT),
            Span::styled(" Copy] [", TEXT_DIM),
            Span::styled("Esc/Enter", KEY_HINT),
            Span::styled(" Close] ", TEXT_DIM),
        ]);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", self.inspection.column_name))
                    .title_alignment(Alignment::Center)
                    .title_bottom(help)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, popup_area);
    }
}
