//! One-shot catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # List every book
//! bookstore books
//!
//! # Search titles, authors and descriptions
//! bookstore search python
//! ```

use std::io::Write;

use bookstore_core::{Bookstore, Command};

use crate::config::CliConfig;
use crate::render;

use super::CliError;

/// Print the seed catalog.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    run(config, Command::ListBooks, out)
}

/// Search the seed catalog.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn search(config: &CliConfig, term: String, out: &mut impl Write) -> Result<(), CliError> {
    run(config, Command::Search { term }, out)
}

fn run(config: &CliConfig, command: Command, out: &mut impl Write) -> Result<(), CliError> {
    let mut store = Bookstore::new(config.admin.clone());
    let outcome = store.execute(command)?;
    writeln!(out, "{}", render::outcome(&outcome, config.currency))?;
    Ok(())
}
