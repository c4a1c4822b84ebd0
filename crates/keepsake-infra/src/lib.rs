//! Infrastructure layer for Keepsake.
//!
//! Contains implementations of the storage trait defined in `keepsake-core`:
//! SQLite-backed durable storage, an ephemeral in-memory store, plus data
//! directory resolution and `config.toml` loading.

pub mod config;
pub mod memory;
pub mod sqlite;
