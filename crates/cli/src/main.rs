//! Bookstore CLI - catalog listing and an interactive shop/admin shell.
//!
//! # Usage
//!
//! ```bash
//! # Print the catalog
//! bookstore books
//!
//! # Search titles, authors and descriptions
//! bookstore search "machine learning"
//!
//! # Browse, buy and manage inventory interactively
//! bookstore shell
//! ```
//!
//! Every run starts from the seed catalog; nothing is persisted.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod render;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about = "Bookstore catalog and point-of-sale shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every book in the catalog
    Books,
    /// Search titles, authors and descriptions
    Search {
        /// Case-insensitive search term
        term: String,
    },
    /// Start an interactive session
    Shell,
}

fn main() {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    if config.admin.is_default() {
        tracing::warn!("Using default admin credentials; set BOOKSTORE_ADMIN_PASSWORD");
    }

    match cli.command {
        Commands::Books => commands::catalog::list(&config, &mut io::stdout().lock())?,
        Commands::Search { term } => {
            commands::catalog::search(&config, term, &mut io::stdout().lock())?;
        }
        Commands::Shell => commands::shell::run(&config)?,
    }
    io::stdout().flush()?;
    Ok(())
}
