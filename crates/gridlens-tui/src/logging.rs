//! Log subscriber setup.
//!
//! The terminal is in raw mode while the UI runs, so records go to a file.
//! `log` records from gridlens-core reach the same subscriber through the
//! tracing-log bridge installed by `try_init`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TuiError, TuiResult};

/// Install a file-backed subscriber. Level comes from `RUST_LOG`, default `info`.
pub fn init(path: &Path) -> TuiResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))?;

    tracing::info!("logging to {}", path.display());
    Ok(())
}
