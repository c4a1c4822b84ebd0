//! SQLite storage layer.
//!
//! Key-value storage backed by SQLite with WAL mode and split read/write
//! connection pools.

pub mod kv;
pub mod pool;
