//! CLI command definitions and dispatch for the `kpsk` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a noun-verb
//! pattern (e.g., `kpsk draft list`, `kpsk history clear`).

pub mod draft;
pub mod history;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Inspect and maintain locally persisted draft snapshots.
#[derive(Parser)]
#[command(name = "kpsk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry (local development).
    #[arg(long, global = true, env = "KEEPSAKE_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage draft snapshots within a surface namespace.
    Draft {
        #[command(subcommand)]
        action: draft::DraftCommand,
    },

    /// Manage per-user generation history.
    History {
        #[command(subcommand)]
        action: history::HistoryCommand,
    },

    /// System status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
