//! CLI for inspecting and repairing the ojsync progress ledger.

mod commands;


use anyhow::Result;
use clap::{Parser, Subcommand};
use ojsync_core::config;
use std::path::PathBuf;

use commands::{run_mark_done, run_reset, run_status};

/// Top-level CLI for the ojsync ledger tools.
#[derive(Debug, Parser)]
#[command(name = "ojsync")]
#[command(about = "ojsync: resumable batch-transfer ledger tools", long_about = None)]
pub struct Cli {
    /// Ledger file to operate on (default: config, else the XDG state dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show ledger entries and summary counts.
    Status,

    /// Clear interrupted (in-progress) entries so the next run redoes them.
    Reset {
        /// Only clear this key instead of every in-progress entry.
        #[arg(long)]
        key: Option<String>,
    },

    /// Record an item as completed (e.g. transferred out of band).
    MarkDone {
        /// Ledger key of the item.
        key: String,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let ledger_path = match &cli.ledger {
            Some(path) => path.clone(),
            None => cfg.ledger_path()?,
        };

        match cli.command {
            CliCommand::Status => run_status(&ledger_path)?,
            CliCommand::Reset { key } => run_reset(&ledger_path, key.as_deref())?,
            CliCommand::MarkDone { key } => run_mark_done(&ledger_path, &key)?,
        }

        Ok(())
    }
}
