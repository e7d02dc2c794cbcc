mod cli;
mod config;
mod db;
mod models;
mod rotation;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse(), handlers::confirm_prompt)
}

/// Load config, open the prayer log and dispatch one command.
///
/// `confirm` answers the yes/no question asked before `add` writes.
fn run<F>(cli: Cli, confirm: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_or_init(&config_path).context("Loading config")?;

    let db_path = config.storage_path().context("Resolving storage location")?;
    // Dropped on every return path below, closing the database.
    let conn = db::open(&db_path)?;

    match cli.command {
        Commands::Add { count, yes } => {
            handlers::handle_add(&conn, &config, count, yes, confirm)?;
        }
        Commands::Report { json } => {
            handlers::handle_report(&conn, json)?;
        }
        Commands::Next => {
            handlers::handle_next(&conn, &config)?;
        }
        Commands::History { limit, json } => {
            handlers::handle_history(&conn, &config, limit, json)?;
        }
    }

    Ok(())
}
