//! System status dashboard command.

use anyhow::Result;
use console::style;

use keepsake_core::draft::snapshot::DRAFT_KEY_PREFIX;
use keepsake_core::history::HISTORY_NAMESPACE;
use keepsake_core::storage::kv_store::KeyValueStore;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows stored entry counts, the active retention configuration, and
/// data directory info.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    // Gather stats. A failed listing degrades to an empty view rather
    // than aborting the dashboard.
    let keys = state.store.list_keys("").await.unwrap_or_default();

    let draft_marker = format!("-{DRAFT_KEY_PREFIX}-");
    let history_prefix = format!("{HISTORY_NAMESPACE}-");

    let drafts = keys.iter().filter(|k| k.contains(&draft_marker)).count();
    let histories = keys
        .iter()
        .filter(|k| k.starts_with(&history_prefix))
        .count();

    let retention = state.config.draft_retention();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "entries": {
                "total": keys.len(),
                "drafts": drafts,
                "histories": histories,
            },
            "retention_secs": retention.as_secs(),
            "history_limit": state.config.history_limit,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Keepsake v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    // Entry counts
    println!("  {}", style("── Entries ──").dim());
    println!("  Total:     {}", style(keys.len()).bold());
    println!("  Drafts:    {}", style(drafts).green());
    println!("  Histories: {}", style(histories).green());
    println!();

    // Config
    println!("  {}", style("── Config ──").dim());
    println!("  Retention: {}s", retention.as_secs());
    match state.config.history_limit {
        Some(limit) => println!("  History limit: {limit}"),
        None => println!("  History limit: unbounded"),
    }
    println!();

    // System
    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
