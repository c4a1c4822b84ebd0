//! Keepsake CLI entry point.
//!
//! Binary name: `kpsk`
//!
//! Parses CLI arguments, initializes the snapshot database, then dispatches
//! to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,keepsake=debug",
        _ => "trace",
    };

    keepsake_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "kpsk", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, config)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Draft { action } => {
            cli::draft::handle_draft_command(action, &state, cli.json).await?;
        }

        Commands::History { action } => {
            cli::history::handle_history_command(action, &state, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    keepsake_observe::tracing_setup::shutdown_tracing();

    Ok(())
}
