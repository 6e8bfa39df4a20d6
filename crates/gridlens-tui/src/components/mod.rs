//! UI components for gridlens.
//!
//! Panels implement [`Component`]; overlays expose a `render` method and are
//! driven directly by the app's key handler.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

mod cell_viewer;
pub mod clipboard;
mod copy_menu;
mod grid_panel;
mod help_overlay;
mod input_bar;
pub mod state_renderer;
mod status_bar;
pub mod styles;
mod table_list;

pub use cell_viewer::CellViewer;
pub use clipboard::{ChannelNotifier, SystemClipboard};
pub use copy_menu::{CopyMenu, CopyMenuEvent, CopyScope};
pub use grid_panel::GridPanel;
pub use help_overlay::HelpOverlay;
pub use input_bar::{InputBar, InputEvent, InputKind};
pub use status_bar::StatusBar;
pub use table_list::TableList;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tables,
    Grid,
}

impl Focus {
    /// The other panel.
    pub fn next(self) -> Self {
        match self {
            Focus::Tables => Focus::Grid,
            Focus::Grid => Focus::Tables,
        }
    }
}

/// Common trait for all UI components.
pub trait Component {
    /// Draw the component within the given area.
    /// Takes `&mut self` to support stateful widgets like TableState.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Handle keyboard input. Returns true if the event was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
}

/// Calculate a centered rect with percentage-based dimensions.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
