//! Generation history CLI subcommands.
//!
//! Provides list, remove, and clear operations on a user's persisted
//! generation history. All operations are scoped to a single user id; there
//! is no cross-user view by design of the storage keys.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use keepsake_core::history::GenerationHistory;
use keepsake_infra::sqlite::kv::SqliteKvStore;

use crate::state::AppState;

/// Generation history subcommands.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List a user's recent generations, newest first.
    List {
        /// User id owning the history.
        user_id: String,
    },

    /// Remove the entry with a matching creation timestamp.
    Remove {
        /// User id owning the history.
        user_id: String,

        /// RFC 3339 creation timestamp of the entry to remove
        /// (as shown by `history list --json`).
        created_at: String,
    },

    /// Wipe a user's entire history.
    Clear {
        /// User id owning the history.
        user_id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a history subcommand.
pub async fn handle_history_command(
    cmd: HistoryCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        HistoryCommand::List { user_id } => history_list(state, &user_id, json).await,
        HistoryCommand::Remove {
            user_id,
            created_at,
        } => history_remove(state, &user_id, &created_at, json).await,
        HistoryCommand::Clear { user_id, force } => {
            history_clear(state, &user_id, force, json).await
        }
    }
}

async fn open_history(state: &AppState, user_id: &str) -> GenerationHistory<SqliteKvStore> {
    let limit = state.config.history_limit.map(|n| n as usize);
    GenerationHistory::open(state.store.clone(), user_id, limit).await
}

/// List a user's generations in a rich colored table.
async fn history_list(state: &AppState, user_id: &str, json: bool) -> Result<()> {
    let history = open_history(state, user_id).await;

    if json {
        println!("{}", serde_json::to_string_pretty(history.records())?);
        return Ok(());
    }

    if history.is_empty() {
        println!();
        println!(
            "  {} No generations recorded for '{}'.",
            style("i").blue().bold(),
            style(user_id).cyan(),
        );
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Generations for '{}' ({} entries)",
        style(user_id).cyan(),
        history.len(),
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Asset").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Prompt").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for record in history.records() {
        table.add_row(vec![
            Cell::new(&record.asset_url).fg(Color::Cyan),
            Cell::new(record.kind.as_str()).fg(Color::White),
            Cell::new(prompt_preview(record.prompt.as_deref())).fg(Color::DarkGrey),
            Cell::new(format_relative_time(&record.created_at)).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Remove the history entry with the matching creation timestamp.
async fn history_remove(
    state: &AppState,
    user_id: &str,
    created_at: &str,
    json: bool,
) -> Result<()> {
    let stamp: DateTime<Utc> = created_at
        .parse()
        .with_context(|| format!("'{created_at}' is not an RFC 3339 timestamp"))?;

    let mut history = open_history(state, user_id).await;
    let removed = history.remove(stamp).await;

    if json {
        let result = serde_json::json!({
            "user_id": user_id,
            "created_at": created_at,
            "removed": removed,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if removed == 0 {
        println!(
            "  {} No entry created at '{}' for '{}'.",
            style("i").blue().bold(),
            style(created_at).cyan(),
            style(user_id).cyan(),
        );
    } else {
        println!(
            "  {} Removed {} entr{} from '{}'.",
            style("ok").green(),
            removed,
            if removed == 1 { "y" } else { "ies" },
            style(user_id).cyan(),
        );
    }
    println!();

    Ok(())
}

/// Wipe a user's entire history with confirmation.
async fn history_clear(state: &AppState, user_id: &str, force: bool, json: bool) -> Result<()> {
    let mut history = open_history(state, user_id).await;

    if history.is_empty() {
        if json {
            println!("{}", serde_json::json!({ "user_id": user_id, "cleared": 0 }));
        } else {
            println!();
            println!(
                "  {} No generations recorded for '{}'.",
                style("i").blue().bold(),
                style(user_id).cyan(),
            );
            println!();
        }
        return Ok(());
    }

    let count = history.len();

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete all {} history entries for '{}'?",
                count,
                style(user_id).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    history.clear().await;

    if json {
        println!("{}", serde_json::json!({ "user_id": user_id, "cleared": count }));
    } else {
        println!();
        println!(
            "  {} Cleared {} entries for '{}'.",
            style("ok").green(),
            count,
            style(user_id).cyan(),
        );
        println!();
    }

    Ok(())
}

/// Shorten a prompt for table display. Prompts are arbitrary user prose,
/// so the cut must land on a char boundary, never a byte offset.
fn prompt_preview(prompt: Option<&str>) -> String {
    match prompt {
        Some(p) if p.chars().count() > 40 => {
            let head: String = p.chars().take(37).collect();
            format!("{head}...")
        }
        Some(p) => p.to_string(),
        None => "(none)".to_string(),
    }
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
