//! Grid panel: paints the engine's view of the current page.
//!
//! Locked columns are drawn first at fixed slot width and never scroll; the
//! remaining columns scroll horizontally behind them. The cursor column is a
//! display position, mapped back to a data column through
//! [`display_order`].

use crossterm::event::{KeyCode, KeyEvent};
use gridlens_core::display::table::display_order;
use gridlens_core::format::FormattedCell;
use gridlens_core::grid::{GridState, HeaderCell, PagerInfo};
use gridlens_core::model::Mode;
use gridlens_core::utils::text::{single_line, truncate_text_unicode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use super::state_renderer::{LoadStateConfig, render_grid_status};
use super::styles::{
    HIGHLIGHT_SYMBOL, KEY_HINT, NULL_STYLE, TEXT_DIM, border_style, cell_cursor_style,
    header_style, locked_column_style, primary_key_header_style, row_highlight_style,
    selected_style,
};
use crate::layout::grid::{MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, PAGER_HEIGHT};

const LOCK_SUFFIX: &str = " [L]";
const COLUMN_SPACING: u16 = 1;

/// Cursor and scroll state for the grid.
#[derive(Debug, Default)]
pub struct GridPanel {
    table_state: TableState,
    /// Cursor column as a display position (locked columns first)
    cursor: usize,
    /// First unlocked column drawn, counted among unlocked columns
    scroll_x: usize,
}

impl GridPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top-left cell, e.g. after switching tables.
    pub fn reset(&mut self) {
        self.table_state = TableState::default();
        self.cursor = 0;
        self.scroll_x = 0;
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Data column index under the cursor.
    pub fn selected_column(&self, grid: &GridState) -> Option<usize> {
        display_order(grid.visible_columns().len(), grid.locked_columns())
            .get(self.cursor)
            .copied()
    }

    /// Put the cursor back on `column` after the display order changed.
    pub fn follow_column(&mut self, grid: &GridState, column: usize) {
        let order = display_order(grid.visible_columns().len(), grid.locked_columns());
        if let Some(position) = order.iter().position(|&c| c == column) {
            self.cursor = position;
        }
    }

    /// Keep the cursor inside the current page. Call after every load.
    pub fn clamp(&mut self, grid: &GridState) {
        let rows = grid.visible_rows().len();
        let columns = grid.visible_columns().len();
        self.table_state.select(match rows {
            0 => None,
            n => Some(self.table_state.selected().unwrap_or(0).min(n - 1)),
        });
        self.cursor = self.cursor.min(columns.saturating_sub(1));
        self.scroll_x = self.scroll_x.min(columns.saturating_sub(1));
    }

    /// Cursor movement. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, grid: &GridState) -> bool {
        let rows = grid.visible_rows().len();
        let columns = grid.visible_columns().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.table_state.selected() {
                    self.table_state.select(Some(i.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let next = self.table_state.selected().map_or(0, |i| i + 1);
                if next < rows {
                    self.table_state.select(Some(next));
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.cursor + 1 < columns {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                if rows > 0 {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::End => {
                if rows > 0 {
                    self.table_state.select(Some(rows - 1));
                }
            }
            _ => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, grid: &GridState, focused: bool) {
        let title = panel_title(grid);
        let config = LoadStateConfig::new(&title, focused)
            .with_idle_message("Select a table from the list and press Enter")
            .with_loading_message("Loading rows...");
        if render_grid_status(frame, area, &grid.status(), &config, grid.empty_message()) {
            return;
        }
        self.clamp(grid);

        let header = grid.header();
        let rows = grid.formatted_rows();
        let order = display_order(header.len(), grid.locked_columns());
        let locked_count = grid.locked_columns().len().min(order.len());

        let mut widths = locked_widths(&header, &order[..locked_count], grid.options().slot_width);
        widths.extend(
            order[locked_count..]
                .iter()
                .map(|&c| content_width(&header[c], &rows, c)),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(PAGER_HEIGHT)]).areas(inner);

        // Locked block first, then as many scrolled columns as fit
        let available = table_area.width.saturating_sub(HIGHLIGHT_SYMBOL.width() as u16);
        let locked_width = widths[..locked_count]
            .iter()
            .fold(0u16, |sum, w| sum.saturating_add(w.saturating_add(COLUMN_SPACING)));
        let unlocked = &widths[locked_count..];
        let room = available.saturating_sub(locked_width);
        self.scroll_into_view(unlocked, locked_count, room);
        let shown = fit_columns(unlocked, self.scroll_x, room);
        let drawn: Vec<usize> = (0..locked_count)
            .chain(locked_count + self.scroll_x..locked_count + self.scroll_x + shown)
            .collect();

        let selected_row = self.table_state.selected();
        let header_row = Row::new(drawn.iter().map(|&p| header_cell(&header[order[p]])))
            .style(header_style())
            .bottom_margin(1);
        let body: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(r, cells)| {
                let is_selected = selected_row == Some(r);
                let row_cells = drawn.iter().map(|&p| {
                    let column = order[p];
                    let style = if is_selected && focused && p == self.cursor {
                        cell_cursor_style()
                    } else if p < locked_count && !is_selected {
                        locked_column_style()
                    } else {
                        Style::default()
                    };
                    body_cell(cells.get(column), widths[p], style)
                });
                let row = Row::new(row_cells);
                if is_selected {
                    row.style(row_highlight_style())
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(body, drawn.iter().map(|&p| Constraint::Length(widths[p])))
            .header(header_row)
            .column_spacing(COLUMN_SPACING)
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        let indicator = column_indicator(self.scroll_x, shown, unlocked.len());
        frame.render_widget(block.title(format!(" {}{} ", title, indicator)), area);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);
        frame.render_widget(Paragraph::new(footer_line(grid)), footer_area);
    }

    /// Adjust `scroll_x` so an unlocked cursor column is drawn.
    fn scroll_into_view(&mut self, unlocked: &[u16], locked_count: usize, room: u16) {
        let Some(target) = self.cursor.checked_sub(locked_count) else {
            return;
        };
        if target < self.scroll_x {
            self.scroll_x = target;
        }
        while self.scroll_x < target
            && target >= self.scroll_x + fit_columns(unlocked, self.scroll_x, room)
        {
            self.scroll_x += 1;
        }
        self.scroll_x = self.scroll_x.min(unlocked.len().saturating_sub(1));
    }
}

/// How many columns starting at `start` fit in `room`. At least one when
/// any remain, so a very wide column is clipped rather than hidden.
fn fit_columns(widths: &[u16], start: usize, room: u16) -> usize {
    let mut used: u16 = 0;
    let mut count = 0;
    for &w in widths.iter().skip(start) {
        let needed = w.saturating_add(COLUMN_SPACING);
        if count > 0 && used.saturating_add(needed) > room {
            break;
        }
        used = used.saturating_add(needed);
        count += 1;
    }
    count
}

/// Drawn widths of the locked columns, `locked` in display order.
///
/// Each column fills the gap between its lock offset and the next one, so
/// locked columns start exactly at their offsets within the locked block.
fn locked_widths(header: &[HeaderCell], locked: &[usize], slot_width: u32) -> Vec<u16> {
    let offsets: Vec<u32> = locked
        .iter()
        .map(|&c| header[c].offset.unwrap_or_default())
        .collect();
    offsets
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let gap = match offsets.get(k + 1) {
                Some(&next) => next.saturating_sub(start),
                None => slot_width,
            };
            let slot = u16::try_from(gap).unwrap_or(u16::MAX);
            slot.saturating_sub(COLUMN_SPACING).max(MIN_COLUMN_WIDTH)
        })
        .collect()
}

/// Header or widest cell on the page, within the configured bounds.
fn content_width(header: &HeaderCell, rows: &[Vec<FormattedCell>], column: usize) -> u16 {
    let header_width = header_text(header).width();
    let cell_width = rows
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| single_line(cell.display.as_str()).width())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(header_width.max(cell_width)).unwrap_or(u16::MAX);
    width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

fn header_text(header: &HeaderCell) -> String {
    if header.locked {
        format!("{}{}", header.label(), LOCK_SUFFIX)
    } else {
        header.label()
    }
}

fn header_cell(header: &HeaderCell) -> Cell<'static> {
    let cell = Cell::from(header_text(header));
    if header.is_primary_key {
        cell.style(primary_key_header_style())
    } else {
        cell
    }
}

fn body_cell(cell: Option<&FormattedCell>, width: u16, style: Style) -> Cell<'static> {
    let Some(cell) = cell else {
        return Cell::from("").style(style);
    };
    let text = truncate_text_unicode(&single_line(cell.display.as_str()), width as usize);
    if cell.display.is_null() {
        Cell::from(text).style(NULL_STYLE.patch(style))
    } else {
        Cell::from(text).style(style)
    }
}

/// Table name plus active search and sort.
fn panel_title(grid: &GridState) -> String {
    let mut title = grid.title();
    if grid.mode() == Mode::Browsing {
        let browsing = grid.browsing();
        if !browsing.search_term.is_empty() {
            title.push_str(&format!(" [/{}]", browsing.search_term));
        }
        if let Some(sort) = &browsing.sort {
            title.push_str(&format!(" [Sort: {} {}]", sort.column, sort.direction.arrow()));
        }
    }
    title
}

/// "Col x-y/n" with arrows when unlocked columns are scrolled out of view.
fn column_indicator(scroll_x: usize, shown: usize, total: usize) -> String {
    if total == 0 || shown >= total {
        return String::new();
    }
    let end = scroll_x + shown;
    let left_arrow = if scroll_x > 0 { "← " } else { "  " };
    let right_arrow = if end < total { " →" } else { "  " };
    format!(" {}Col {}-{}/{}{}", left_arrow, scroll_x + 1, end, total, right_arrow)
}

fn footer_line(grid: &GridState) -> Line<'static> {
    match grid.pager() {
        Some(pager) => pager_line(&pager),
        None => Line::from(vec![
            Span::styled(format!(" {} rows", grid.total_row_count()), TEXT_DIM),
            Span::styled("  b", KEY_HINT),
            Span::styled(" back to table", TEXT_DIM),
        ]),
    }
}

fn pager_line(pager: &PagerInfo) -> Line<'static> {
    let mut spans = vec![Span::styled(format!(" {}", pager.summary()), TEXT_DIM)];
    if pager.has_controls() {
        spans.push(Span::raw("   "));
        if pager.window.first().is_some_and(|&p| p > 1) {
            spans.push(Span::styled("… ", TEXT_DIM));
        }
        for &page in &pager.window {
            if page == pager.page {
                spans.push(Span::styled(format!(" {} ", page), selected_style()));
            } else {
                spans.push(Span::raw(format!(" {} ", page)));
            }
        }
        if pager.window.last().is_some_and(|&p| p < pager.total_pages) {
            spans.push(Span::styled(" …", TEXT_DIM));
        }
        spans.push(Span::styled(
            format!("  Page {}/{}", pager.page, pager.total_pages),
            TEXT_DIM,
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{MemoryClipboard, loaded_grid, loaded_grid_with};
    use gridlens_core::grid::GridOptions;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn people() -> GridState {
        loaded_grid(
            "people",
            &["id", "name", "bio"],
            vec![
                vec![json!(1), json!("ann"), json!(null)],
                vec![json!(2), json!("bob"), json!("likes\ttabs")],
            ],
            120,
            Arc::new(MemoryClipboard::default()),
        )
    }

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
    fn test_fit_columns() {
        assert_eq!(fit_columns(&[10, 10, 10], 0, 22), 2);
        assert_eq!(fit_columns(&[10, 10, 10], 1, 100), 2);
        // one oversized column is still shown
        assert_eq!(fit_columns(&[50], 0, 10), 1);
        assert_eq!(fit_columns(&[], 0, 10), 0);
    }

    #[test]
    fn test_fit_columns_saturates() {
        assert_eq!(fit_columns(&[u16::MAX, u16::MAX], 0, 100), 1);
    }

    #[test]
    fn test_locked_widths_follow_offsets() {
        let mut grid = people();
        grid.toggle_lock(2);
        grid.toggle_lock(0);
        let header = grid.header();
        assert_eq!(header[0].offset, Some(0));
        assert_eq!(header[2].offset, Some(20));
        // slot of 20 cells minus the column gap
        assert_eq!(locked_widths(&header, &[0, 2], 20), vec![19, 19]);
    }

    #[test]
    fn test_huge_slot_width_renders() {
        let options = GridOptions {
            slot_width: 3_000_000_000,
            ..GridOptions::default()
        };
        let mut grid = loaded_grid_with(
            options,
            "people",
            &["id", "name", "bio"],
            vec![vec![json!(1), json!("ann"), json!(null)]],
            1,
            Arc::new(MemoryClipboard::default()),
        );
        grid.toggle_lock(0);
        grid.toggle_lock(1);
        grid.toggle_lock(2);
        let header = grid.header();
        assert_eq!(
            locked_widths(&header, &[0, 1, 2], 3_000_000_000),
            vec![u16::MAX - 1; 3]
        );

        let mut panel = GridPanel::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), &grid, true))
            .unwrap();
        assert!(screen_text(&terminal).contains("people"));
    }

    #[test]
    fn test_column_indicator() {
        assert_eq!(column_indicator(0, 3, 3), "");
        assert_eq!(column_indicator(0, 2, 5), "   Col 1-2/5 →");
        assert_eq!(column_indicator(3, 2, 5), " ← Col 4-5/5  ");
    }

    #[test]
    fn test_cursor_movement_bounded() {
        let grid = people();
        let mut panel = GridPanel::new();
        panel.clamp(&grid);
        assert_eq!(panel.selected_row(), Some(0));

        panel.handle_key(key(KeyCode::Down), &grid);
        panel.handle_key(key(KeyCode::Down), &grid);
        assert_eq!(panel.selected_row(), Some(1));

        panel.handle_key(key(KeyCode::Right), &grid);
        panel.handle_key(key(KeyCode::Char('l')), &grid);
        panel.handle_key(key(KeyCode::Right), &grid);
        assert_eq!(panel.selected_column(&grid), Some(2));

        panel.handle_key(key(KeyCode::Left), &grid);
        assert_eq!(panel.selected_column(&grid), Some(1));
        assert!(!panel.handle_key(key(KeyCode::Char('z')), &grid));
    }

    #[test]
    fn test_cursor_follows_locked_column() {
        let mut grid = people();
        let mut panel = GridPanel::new();
        panel.clamp(&grid);
        panel.handle_key(key(KeyCode::Right), &grid);
        panel.handle_key(key(KeyCode::Right), &grid);
        assert_eq!(panel.selected_column(&grid), Some(2));

        grid.toggle_lock(2);
        panel.follow_column(&grid, 2);
        // locked column moves to the front
        assert_eq!(panel.selected_column(&grid), Some(2));
        assert_eq!(panel.cursor, 0);
    }

    #[test]
    fn test_render_shows_header_rows_and_pager() {
        let mut grid = people();
        grid.toggle_lock(1);
        let mut panel = GridPanel::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), &grid, true))
            .unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("people"));
        assert!(text.contains("name [L]"));
        assert!(text.contains("NULL"));
        assert!(text.contains("likes tabs"));
        assert!(text.contains("Showing 1 to 50 of 120 results"));
        assert!(text.contains("Page 1/3"));
        // locked column is drawn before id
        let header_line = text.lines().find(|l| l.contains("name [L]")).unwrap();
        assert!(header_line.find("name [L]") < header_line.find("id"));
    }

    #[test]
    fn test_render_idle_grid() {
        let grid = GridState::new(
            gridlens_core::grid::GridOptions::default(),
            vec![],
            Arc::new(MemoryClipboard::default()),
            Arc::new(crate::test_support::SilentNotifier),
        );
        let mut panel = GridPanel::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), &grid, false))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("No table selected"));
        assert!(text.contains("Select a table"));
    }
}
