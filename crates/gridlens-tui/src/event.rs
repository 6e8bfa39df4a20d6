//! Terminal input as an async stream.
//!
//! crossterm polling blocks, so it runs on its own thread and forwards events
//! into a tokio channel the app loop can `select!` on next to its actions.

use std::io;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Terminal events that the application can handle.
#[derive(Debug)]
pub enum Event {
    /// Key press (releases are dropped)
    Key(KeyEvent),
    /// No input within one tick
    Tick,
    Resize(u16, u16),
}

/// Receives terminal events from the polling thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Start polling with the given tick rate.
    ///
    /// The thread exits once the handler is dropped or the terminal stops
    /// answering.
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            loop {
                let event = match poll(tick_rate) {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::error!("terminal input failed: {}", err);
                        break;
                    }
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Next event, or `None` once the polling thread has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

fn poll(tick_rate: Duration) -> io::Result<Event> {
    if !event::poll(tick_rate)? {
        return Ok(Event::Tick);
    }
    Ok(match event::read()? {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
        CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
        _ => Event::Tick,
    })
}
