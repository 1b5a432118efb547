//! CLI command implementations.

pub mod catalog;
pub mod shell;

use bookstore_core::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
