//! Business logic and capability traits for Keepsake.
//!
//! This crate owns the draft lifecycle: snapshotting edits into a local
//! key-value store, recovering state after an interruption, reconciling
//! provisional drafts once the server assigns an id, and expiring stale
//! snapshots. The storage and remote-service traits defined here are the
//! "ports"; concrete adapters live in `keepsake-infra`.

pub mod catalog;
pub mod draft;
pub mod event;
pub mod handoff;
pub mod history;
pub mod remote;
pub mod storage;
