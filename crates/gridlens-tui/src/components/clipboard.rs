//! Host-side sinks handed to the grid engine.
//!
//! [`SystemClipboard`] writes through arboard. [`ChannelNotifier`] forwards
//! engine notifications onto the app's action channel so they are shown on
//! the next loop iteration.

use arboard::Clipboard;
use gridlens_core::error::ClipboardError;
use gridlens_core::sinks::{ClipboardSink, Notification, NotificationSink};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::AppAction;

/// Cross-platform system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| ClipboardError(format!("Failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(format!("Failed to copy: {}", e)))
    }
}

/// Notification sink that posts [`AppAction::Notify`].
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<AppAction>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(AppAction::Notify(notification)).is_err() {
            tracing::debug!("action channel closed; notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_channel_notifier_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = ChannelNotifier::new(tx);
        notifier.notify(Notification::error("Copy failed", "Could not copy to clipboard"));

        match rx.try_recv().unwrap() {
            AppAction::Notify(n) => {
                assert!(n.is_error);
                assert_eq!(n.title, "Copy failed");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_channel_notifier_survives_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelNotifier::new(tx).notify(Notification::info("Copied!", "x"));
    }
}
