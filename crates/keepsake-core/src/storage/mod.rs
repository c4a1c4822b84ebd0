//! Storage abstractions for Keepsake.
//!
//! Defines the key-value store trait and the namespaced keyspace wrapper
//! that the draft and history layers are built on.
//! Implementations live in keepsake-infra.

pub mod keyspace;
pub mod kv_store;

#[cfg(test)]
pub(crate) mod testing;
