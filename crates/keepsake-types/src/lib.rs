//! Shared domain types for Keepsake.
//!
//! This crate contains the core domain types used across the Keepsake
//! engine: draft identities and snapshots, generation history records,
//! lifecycle events, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod event;
pub mod history;
pub mod remote;
