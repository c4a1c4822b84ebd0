//! Draft snapshot CLI subcommands.
//!
//! Provides list, show, discard, and sweep operations over the snapshots
//! persisted by a surface namespace (e.g. `template`). Sweeping applies the
//! same retention window the editor surfaces use at teardown.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use keepsake_core::draft::snapshot::{identity_for, SnapshotStore};
use keepsake_core::draft::sweep::sweep_namespace;
use keepsake_core::draft::DraftPolicy;
use keepsake_infra::config::resolve_retention;
use keepsake_infra::sqlite::kv::SqliteKvStore;

use crate::state::AppState;

/// Draft snapshot subcommands.
#[derive(Subcommand)]
pub enum DraftCommand {
    /// List saved snapshots in a namespace, newest first.
    List {
        /// Surface namespace (e.g. "template").
        namespace: String,

        /// Payload field used as the display label.
        #[arg(long, default_value = "name")]
        label_field: String,
    },

    /// Show the stored payload of one snapshot.
    Show {
        /// Surface namespace.
        namespace: String,

        /// Draft id ("new" for the provisional draft).
        id: String,
    },

    /// Delete one snapshot.
    Discard {
        /// Surface namespace.
        namespace: String,

        /// Draft id ("new" for the provisional draft).
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Evict every snapshot older than the retention window.
    Sweep {
        /// Surface namespace.
        namespace: String,

        /// Override the configured retention window, in seconds.
        #[arg(long)]
        retention_secs: Option<u64>,
    },
}

/// Handle a draft subcommand.
pub async fn handle_draft_command(cmd: DraftCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        DraftCommand::List {
            namespace,
            label_field,
        } => draft_list(state, &namespace, &label_field, json).await,
        DraftCommand::Show { namespace, id } => draft_show(state, &namespace, &id, json).await,
        DraftCommand::Discard {
            namespace,
            id,
            force,
        } => draft_discard(state, &namespace, &id, force, json).await,
        DraftCommand::Sweep {
            namespace,
            retention_secs,
        } => draft_sweep(state, &namespace, retention_secs, json).await,
    }
}

fn open_snapshots(state: &AppState, namespace: &str) -> SnapshotStore<SqliteKvStore> {
    let policy = DraftPolicy::new(namespace, serde_json::json!({}));
    SnapshotStore::new(state.store.clone(), &policy)
}

/// List snapshots in a rich colored table.
async fn draft_list(state: &AppState, namespace: &str, label_field: &str, json: bool) -> Result<()> {
    let policy =
        DraftPolicy::new(namespace, serde_json::json!({})).with_label_field(label_field);
    let snapshots = SnapshotStore::new(state.store.clone(), &policy);
    let summaries = snapshots.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!();
        println!(
            "  {} No snapshots under '{}'.",
            style("i").blue().bold(),
            style(namespace).cyan(),
        );
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Snapshots under '{}' ({} entries)",
        style(namespace).cyan(),
        summaries.len(),
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Draft").fg(Color::White),
        Cell::new("Label").fg(Color::White),
        Cell::new("Written").fg(Color::White),
    ]);

    for summary in &summaries {
        let written = match &summary.written_at {
            Some(dt) => format_relative_time(dt),
            None => "unknown".to_string(),
        };

        table.add_row(vec![
            Cell::new(&summary.draft_id).fg(Color::Cyan),
            Cell::new(summary.label.as_deref().unwrap_or("(unnamed)")).fg(Color::White),
            Cell::new(&written).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Show one snapshot's payload and envelope metadata.
async fn draft_show(state: &AppState, namespace: &str, id: &str, json: bool) -> Result<()> {
    let snapshots = open_snapshots(state, namespace);
    let identity = identity_for(id);

    match snapshots.load(&identity).await {
        Some(snapshot) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.to_value())?);
            } else {
                let written = match &snapshot.written_at {
                    Some(dt) => format!("written {}", format_relative_time(dt)),
                    None => "write time unknown".to_string(),
                };

                println!();
                println!(
                    "  {} ({})",
                    style(snapshots.key_for(&identity)).cyan().bold(),
                    style(written).dim(),
                );
                println!();
                println!("{}", serde_json::to_string_pretty(&snapshot.payload)?);
                println!();
            }
        }
        None => {
            if json {
                println!("{}", serde_json::json!({ "key": snapshots.key_for(&identity), "snapshot": null }));
            } else {
                println!();
                println!(
                    "  {} No snapshot stored at '{}'.",
                    style("i").blue().bold(),
                    style(snapshots.key_for(&identity)).cyan(),
                );
                println!();
            }
        }
    }

    Ok(())
}

/// Delete one snapshot with confirmation.
async fn draft_discard(
    state: &AppState,
    namespace: &str,
    id: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let snapshots = open_snapshots(state, namespace);
    let identity = identity_for(id);
    let key = snapshots.key_for(&identity);

    if snapshots.load_raw(&identity).await.is_none() {
        if json {
            println!("{}", serde_json::json!({ "deleted": false, "key": key }));
        } else {
            println!();
            println!(
                "  {} No snapshot stored at '{}'.",
                style("i").blue().bold(),
                style(&key).cyan(),
            );
            println!();
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete the snapshot at '{}'?",
                style(&key).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    snapshots.delete(&identity).await;

    if json {
        println!("{}", serde_json::json!({ "deleted": true, "key": key }));
    } else {
        println!();
        println!(
            "  {} Snapshot '{}' deleted.",
            style("ok").green(),
            style(&key).cyan(),
        );
        println!();
    }

    Ok(())
}

/// Evict every stale snapshot in the namespace.
async fn draft_sweep(
    state: &AppState,
    namespace: &str,
    retention_secs: Option<u64>,
    json: bool,
) -> Result<()> {
    let snapshots = open_snapshots(state, namespace);
    let retention = resolve_retention(&state.config, retention_secs);
    let evicted = sweep_namespace(&snapshots, retention).await;

    if json {
        let result = serde_json::json!({
            "namespace": namespace,
            "retention_secs": retention.as_secs(),
            "evicted": evicted,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if evicted.is_empty() {
        println!(
            "  {} Nothing to evict under '{}' (retention {}s).",
            style("i").blue().bold(),
            style(namespace).cyan(),
            retention.as_secs(),
        );
    } else {
        println!(
            "  {} Evicted {} snapshot(s) under '{}' (retention {}s):",
            style("ok").green(),
            evicted.len(),
            style(namespace).cyan(),
            retention.as_secs(),
        );
        for draft_id in &evicted {
            println!("    {} {}", style("•").dim(), draft_id);
        }
    }
    println!();

    Ok(())
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
