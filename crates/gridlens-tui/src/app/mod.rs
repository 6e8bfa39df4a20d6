//! Application state and logic for the TUI.
//!
//! ## Module Structure
//! - `mod.rs`: App struct definition, initialization, and rendering
//! - `action_handler.rs`: AppAction event processing
//! - `data_handler.rs`: Background database work on tokio tasks
//! - `input_handler.rs`: Keyboard event processing

mod action_handler;
mod data_handler;
mod input_handler;

use std::sync::Arc;

use gridlens_core::grid::{GridOptions, GridState};
use gridlens_core::model::Mode;
use gridlens_core::sinks::ClipboardSink;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc;

use crate::action::AppAction;
use crate::components::{
    CellViewer, ChannelNotifier, Component, CopyMenu, Focus, GridPanel, HelpOverlay, InputBar,
    StatusBar, TableList,
};
use crate::event::{Event, EventHandler};
use crate::layout::main::{HEADER_HEIGHT, STATUS_BAR_HEIGHT, TABLE_LIST_WIDTH};
use crate::service::DataService;

/// Why the main loop woke up.
enum Wake {
    Action(AppAction),
    Input(Option<Event>),
}

/// What to show once the schema has loaded, from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Startup {
    pub table: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub sql: Option<String>,
}

/// The main application state.
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Panel receiving navigation keys
    pub(crate) focus: Focus,
    /// Engine state behind the grid
    pub(crate) grid: GridState,
    pub(crate) table_list: TableList,
    pub(crate) grid_panel: GridPanel,
    pub(crate) status_bar: StatusBar,
    /// Search / SQL prompt
    pub(crate) input: InputBar,
    /// Open cell viewer overlay, if any
    pub(crate) cell_viewer: Option<CellViewer>,
    /// Open copy menu, if any
    pub(crate) copy_menu: Option<CopyMenu>,
    pub(crate) show_help: bool,
    /// Database access shared with background tasks
    pub(crate) service: Arc<DataService>,
    /// Action sender for async operations
    pub(crate) action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
    /// Applied once after the schema loads
    pub(crate) startup: Option<Startup>,
    /// Page to jump to once the first page of a table has been counted
    pub(crate) pending_page: Option<u32>,
}

impl App {
    pub fn new(
        service: Arc<DataService>,
        options: GridOptions,
        startup: Startup,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(ChannelNotifier::new(action_tx.clone()));
        let grid = GridState::new(options, Vec::new(), clipboard, notifier);

        Self {
            should_quit: false,
            focus: Focus::Tables,
            grid,
            table_list: TableList::new(),
            grid_panel: GridPanel::new(),
            status_bar: StatusBar::new(),
            input: InputBar::new(),
            cell_viewer: None,
            copy_menu: None,
            show_help: false,
            service,
            action_tx,
            action_rx,
            startup: Some(startup),
            pending_page: None,
        }
    }

    /// Run the main application loop.
    ///
    /// Redraws after every key press, finished background task, or tick.
    pub async fn run_async(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> std::io::Result<()> {
        let mut events = EventHandler::new(250);
        self.send(AppAction::LoadSchema);

        while !self.should_quit {
            self.process_actions();

            terminal.draw(|frame| self.draw(frame))?;

            let wake = tokio::select! {
                Some(action) = self.action_rx.recv() => Wake::Action(action),
                event = events.next() => Wake::Input(event),
            };
            match wake {
                Wake::Action(action) => self.handle_action(action),
                Wake::Input(Some(Event::Key(key))) => self.handle_key(key.code, key.modifiers),
                Wake::Input(Some(Event::Resize(_, _) | Event::Tick)) => {}
                Wake::Input(None) => self.should_quit = true,
            }
        }

        Ok(())
    }

    /// Process pending actions from the action queue.
    fn process_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.handle_action(action);
        }
    }

    pub(crate) fn send(&self, action: AppAction) {
        if self.action_tx.send(action).is_err() {
            tracing::warn!("action channel closed");
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(size);

        let [list_area, grid_area] =
            Layout::horizontal([Constraint::Length(TABLE_LIST_WIDTH), Constraint::Min(0)])
                .areas(body_area);

        self.draw_header(frame, header_area);
        self.table_list
            .draw(frame, list_area, self.focus == Focus::Tables);
        self.grid_panel
            .render(frame, grid_area, &self.grid, self.focus == Focus::Grid);
        self.input.render(frame, grid_area);
        self.status_bar.draw(frame, status_area, false);

        if let Some(menu) = &self.copy_menu {
            menu.render(frame, size);
        }
        if let Some(viewer) = &self.cell_viewer {
            viewer.render(frame, size);
        }
        if self.show_help {
            HelpOverlay::render(frame, size);
        }
    }

    /// Database label and the current mode.
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let (mode_label, mode_color) = match self.grid.mode() {
            Mode::Browsing => ("Browsing", Color::Green),
            Mode::AdHoc => ("Query result", Color::Magenta),
        };
        let spans = vec![
            Span::raw(" "),
            Span::styled(
                format!(" {} ", mode_label),
                Style::default()
                    .fg(mode_color)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Span::raw("  "),
            Span::styled(self.service.label().to_string(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  │ {} tables", self.grid.tables().len()),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(" gridlens ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }
}
