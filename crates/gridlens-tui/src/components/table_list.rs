//! Table list panel.
//!
//! Lists the tables of the open database with their row counts. Enter on a
//! table asks the app to open it in the grid.

use crossterm::event::{KeyCode, KeyEvent};
use gridlens_core::model::TableDescriptor;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::Component;
use super::state_renderer::{LoadStateConfig, render_empty, render_non_loaded_state};
use super::styles::{TEXT_DIM, border_style};
use crate::service::LoadState;

const TITLE: &str = " Tables ";

/// Table list showing every user table.
#[derive(Default)]
pub struct TableList {
    state: LoadState<Vec<TableDescriptor>>,
    list_state: ListState,
    /// Table currently open in the grid, marked in the list
    active: Option<String>,
}

impl TableList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list contents, keeping the selection on the same name.
    pub fn update(&mut self, state: LoadState<Vec<TableDescriptor>>) {
        let previous = self.selected_name().map(str::to_string);
        self.state = state;
        let index = match (self.tables(), previous) {
            ([], _) => None,
            (tables, Some(name)) => tables.iter().position(|t| t.name == name).or(Some(0)),
            (_, None) => Some(0),
        };
        self.list_state.select(index);
    }

    pub fn set_active(&mut self, name: Option<&str>) {
        self.active = name.map(str::to_string);
        if let Some(index) = name.and_then(|n| self.tables().iter().position(|t| t.name == n)) {
            self.list_state.select(Some(index));
        }
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn selected_name(&self) -> Option<&str> {
        let index = self.list_state.selected()?;
        self.tables().get(index).map(|t| t.name.as_str())
    }

    fn select_previous(&mut self) {
        if let Some(i) = self.list_state.selected().filter(|&i| i > 0) {
            self.list_state.select(Some(i - 1));
        }
    }

    fn select_next(&mut self) {
        let last = self.tables().len().saturating_sub(1);
        if let Some(i) = self.list_state.selected().filter(|&i| i < last) {
            self.list_state.select(Some(i + 1));
        }
    }

    fn list_item(&self, table: &TableDescriptor) -> ListItem<'static> {
        let is_active = self.active.as_deref() == Some(table.name.as_str());
        let name_style = if is_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if is_active { "● " } else { "  " };
        ListItem::new(Line::from(vec![
            Span::styled(marker, name_style),
            Span::styled(table.name.clone(), name_style),
            Span::styled(format!(" ({})", table.row_count), TEXT_DIM),
        ]))
    }
}

impl Component for TableList {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let config = LoadStateConfig::new(TITLE, focused)
            .with_idle_message("No database loaded")
            .with_loading_message("Reading schema...");
        if render_non_loaded_state(frame, area, &self.state, &config) {
            return;
        }
        if self.tables().is_empty() {
            render_empty(frame, area, &config, "No tables in database");
            return;
        }

        let items: Vec<ListItem> = self.tables().iter().map(|t| self.list_item(t)).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Tables ({}) ", self.tables().len()))
                    .borders(Borders::ALL)
                    .border_style(border_style(focused)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                true
            }
            KeyCode::Home => {
                if !self.tables().is_empty() {
                    self.list_state.select(Some(0));
                }
                true
            }
            KeyCode::End => {
                let len = self.tables().len();
                if len > 0 {
                    self.list_state.select(Some(len - 1));
                }
                true
            }
            _ => false,
        }
    }
}
