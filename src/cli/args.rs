use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Largest batch a single `add` will log.
pub const MAX_BATCH: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "qada", version, about = "Track make-up (qada) prayers")]
pub struct Cli {
    /// Use this config file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log the next batch of made-up prayers
    Add {
        /// Number of prayers made up (defaults to prayers_per_day)
        #[arg(long, short, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_BATCH as u64))]
        count: Option<usize>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show how much has been made up so far
    Report {
        /// Print the totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the next prayer due
    Next,
    /// List the most recently logged prayers
    History {
        /// How many entries to show
        #[arg(long, short, default_value = "10")]
        limit: usize,
        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },
}
