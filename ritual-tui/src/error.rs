//! Error types for the TUI binary.

use thiserror::Error;

/// Top-level error for the TUI.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal or log file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or was invalid.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// A backend call failed outside of the handlers that absorb errors.
    #[error(transparent)]
    Client(#[from] ritual_client::ClientError),
}
