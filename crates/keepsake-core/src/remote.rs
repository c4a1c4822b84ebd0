//! Remote entity service trait.
//!
//! The draft layer never talks to a backend directly; it goes through this
//! trait so tests can script responses and the CLI can plug in whatever
//! transport it likes. Uses RPITIT (native async fn in traits, Rust 2024
//! edition).

use keepsake_types::error::RemoteError;
use keepsake_types::remote::EntityRecord;

/// Trait for the authoritative entity service drafts are saved to.
pub trait EntityClient: Send + Sync {
    /// Fetch the canonical record for an existing entity.
    fn fetch(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<EntityRecord, RemoteError>> + Send;

    /// Create a new entity from a draft payload. The returned record
    /// carries the server-assigned id.
    fn create(
        &self,
        payload: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<EntityRecord, RemoteError>> + Send;

    /// Overwrite an existing entity with a draft payload.
    fn update(
        &self,
        id: &str,
        payload: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<EntityRecord, RemoteError>> + Send;

    /// Submit a saved entity for downstream processing.
    fn submit(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}
