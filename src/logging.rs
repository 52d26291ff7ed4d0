//! Log output setup.
//!
//! The terminal is owned by the interface while the game runs, so logs can only go to a file.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber, writing to `log_file` with the level filter from `RUST_LOG`.
///
/// Without a file nothing is installed and every log event is dropped.
///
/// # Errors
///
/// - [`std::io::Error`] if the file cannot be created.
/// - If a global subscriber was already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    Ok(())
}
