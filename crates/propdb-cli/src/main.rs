//! propdb CLI
//!
//! Loads layered configuration the way an application would and prints
//! resolved values, full dumps and override chains.

mod cli;
mod commands;
mod error;
mod logging;
mod sources;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!(command = ?cli.command, "Starting propdb");

    let db = sources::load_database(&cli.sources).await?;
    execute_command(&db, cli.command)
}

fn execute_command(db: &propdb_core::PropertyDatabase, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get {
            key,
            kind,
            default,
            json,
        } => commands::run_get(db, &key, kind, default.as_deref(), json),
        Commands::Dump { prefix, json } => commands::run_dump(db, prefix.as_deref(), json),
        Commands::Explain { key, json } => commands::run_explain(db, &key, json),
    }
}
