//! Keyboard input handling for the application.
//!
//! Keys go to the first layer that claims them: overlays, then the input
//! prompt, then global bindings, then Enter, then the focused panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridlens_core::model::Mode;

use crate::action::AppAction;
use crate::components::{
    CellViewer, Component, CopyMenu, CopyMenuEvent, CopyScope, Focus, InputEvent, InputKind,
};

use super::App;

impl App {
    /// Handle keyboard input with delegated responsibility.
    pub(super) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        // 1. Overlays
        if self.handle_overlay_keys(code) {
            return;
        }

        // 2. Search / SQL prompt
        if self.handle_input_keys(KeyEvent::new(code, modifiers)) {
            return;
        }

        // 3. Global keybindings
        if self.handle_global_keys(code, modifiers) {
            return;
        }

        // 4. Enter
        if code == KeyCode::Enter && self.handle_enter_key() {
            return;
        }

        // 5. Focused panel
        let key = KeyEvent::new(code, modifiers);
        match self.focus {
            Focus::Tables => {
                self.table_list.handle_key(key);
            }
            Focus::Grid => {
                if !self.handle_grid_keys(code) {
                    self.grid_panel.handle_key(key, &self.grid);
                }
            }
        }
    }

    /// Handle keyboard input when an overlay is open.
    /// Returns true if the key was handled.
    pub(super) fn handle_overlay_keys(&mut self, code: KeyCode) -> bool {
        if let Some(viewer) = self.cell_viewer.as_mut() {
            match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.cell_viewer = None;
                }
                KeyCode::Up | KeyCode::Char('k') => viewer.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => viewer.scroll_down(),
                KeyCode::Char('c') | KeyCode::Char('y') => {
                    self.grid.copy_inspection(viewer.inspection());
                }
                _ => {}
            }
            return true;
        }

        if let Some(menu) = self.copy_menu.as_mut() {
            match menu.handle_key(code) {
                CopyMenuEvent::Pending => {}
                CopyMenuEvent::Cancel => self.copy_menu = None,
                CopyMenuEvent::Copy(scope, format) => {
                    self.copy_menu = None;
                    match (scope, self.grid_panel.selected_row()) {
                        (CopyScope::Row, Some(row)) => {
                            self.grid.copy_row_as(row, format);
                        }
                        (CopyScope::Row, None) => {}
                        (CopyScope::Page, _) => {
                            self.grid.copy_page_as(format);
                        }
                    }
                }
            }
            return true;
        }

        if self.show_help {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return true;
        }

        false
    }

    /// Route keys to the prompt while it is open.
    fn handle_input_keys(&mut self, key: KeyEvent) -> bool {
        if !self.input.is_active() {
            return false;
        }
        match self.input.handle_key(key) {
            InputEvent::Editing | InputEvent::Cancel => {}
            InputEvent::Submit(InputKind::Search, term) => {
                let ticket = self.grid.set_search(&term);
                self.grid_panel.reset();
                self.request_load(ticket);
            }
            InputEvent::Submit(InputKind::Sql, sql) => {
                if sql.is_empty() {
                    self.status_bar.set_message("Nothing to run");
                } else {
                    self.send(AppAction::RunSql(sql));
                }
            }
        }
        true
    }

    /// Handle global keybindings. Returns true if the key was handled.
    pub(super) fn handle_global_keys(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.send(AppAction::NextPanel);
            }
            KeyCode::Char('r') => {
                let ticket = self.grid.refresh();
                if ticket.is_none() && self.grid.mode() == Mode::Browsing {
                    self.send(AppAction::LoadSchema);
                }
                self.request_load(ticket);
            }
            KeyCode::Char('/') => {
                if self.grid.mode() != Mode::Browsing || self.grid.current_table().is_none() {
                    self.status_bar.set_message("Open a table to search");
                } else {
                    let term = self.grid.browsing().search_term.clone();
                    self.input.open(InputKind::Search, &term);
                }
            }
            KeyCode::Char(':') => {
                self.input.open(InputKind::Sql, "");
            }
            KeyCode::Char('b') => {
                self.send(AppAction::BackToBrowsing);
            }
            KeyCode::Esc => return self.handle_escape_key(),
            _ => return false,
        }
        true
    }

    /// Escape steps back: ad-hoc result, then active search.
    fn handle_escape_key(&mut self) -> bool {
        if self.grid.mode() == Mode::AdHoc {
            self.send(AppAction::BackToBrowsing);
            return true;
        }
        if !self.grid.browsing().search_term.is_empty() {
            let ticket = self.grid.set_search("");
            self.grid_panel.reset();
            self.request_load(ticket);
            return true;
        }
        false
    }

    /// Enter opens the selected table, or inspects the cell under the cursor.
    pub(super) fn handle_enter_key(&mut self) -> bool {
        match self.focus {
            Focus::Tables => {
                let Some(name) = self.table_list.selected_name().map(str::to_string) else {
                    return false;
                };
                self.send(AppAction::SelectTable(name));
                true
            }
            Focus::Grid => {
                let row = self.grid_panel.selected_row();
                let column = self.grid_panel.selected_column(&self.grid);
                let Some(inspection) = row
                    .zip(column)
                    .and_then(|(r, c)| self.grid.inspect_cell(r, c))
                else {
                    return false;
                };
                self.cell_viewer = Some(CellViewer::new(inspection));
                true
            }
        }
    }

    /// Grid commands. Returns true if the key was handled.
    fn handle_grid_keys(&mut self, code: KeyCode) -> bool {
        let row = self.grid_panel.selected_row();
        let column = self.grid_panel.selected_column(&self.grid);
        match code {
            KeyCode::Char('n') | KeyCode::PageDown => {
                let ticket = self.grid.next_page();
                self.request_load(ticket);
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                let ticket = self.grid.prev_page();
                self.request_load(ticket);
            }
            KeyCode::Char('g') => {
                let ticket = self.grid.first_page();
                self.request_load(ticket);
            }
            KeyCode::Char('G') => {
                let ticket = self.grid.last_page();
                self.request_load(ticket);
            }
            KeyCode::Char('s') => {
                if self.grid.mode() != Mode::Browsing {
                    self.status_bar
                        .set_message("Sorting is available while browsing a table");
                } else if let Some(name) = column.and_then(|c| self.grid.visible_columns().get(c))
                {
                    let name = name.clone();
                    let ticket = self.grid.set_sort(&name);
                    self.request_load(ticket);
                }
            }
            KeyCode::Char('L') => {
                if let Some(c) = column {
                    let locked = self.grid.toggle_lock(c);
                    self.grid_panel.follow_column(&self.grid, c);
                    let name = self.grid.visible_columns().get(c).cloned().unwrap_or_default();
                    self.status_bar.set_message(if locked {
                        format!("Locked column {}", name)
                    } else {
                        format!("Unlocked column {}", name)
                    });
                }
            }
            KeyCode::Char('y') => {
                if let Some(r) = row {
                    self.grid.copy_row(r);
                }
            }
            KeyCode::Char('Y') => {
                if let Some(c) = column {
                    self.grid.copy_column(c);
                }
            }
            KeyCode::Char('c') => {
                if !self.grid.visible_rows().is_empty() {
                    self.copy_menu = Some(CopyMenu::new());
                }
            }
            _ => return false,
        }
        true
    }
}
