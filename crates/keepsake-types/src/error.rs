use thiserror::Error;

/// Errors from key-value storage adapters.
///
/// These never cross the keyed-store boundary in keepsake-core: the
/// `Keyspace` wrapper absorbs and logs them, degrading reads to "absent"
/// and writes to no-ops.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,

    #[error("storage operation failed: {0}")]
    Operation(String),

    #[error("malformed stored value: {0}")]
    Malformed(String),
}

/// Errors from the remote entity service.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("entity not found")]
    NotFound,

    #[error("remote service unavailable: {0}")]
    Unavailable(String),

    #[error("remote service rejected the request: {0}")]
    Rejected(String),
}

/// User-visible, non-fatal failures of a draft session.
///
/// All variants leave local state recoverable: `Load` means the editor
/// cannot open (host navigates back), `Save` and `Submit` preserve the
/// local snapshot so the user can retry, `Cancelled` means the editor tore
/// down before recovery finished and its result was discarded.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("could not load entity: {0}")]
    Load(RemoteError),

    #[error("could not save entity: {0}")]
    Save(RemoteError),

    #[error("could not submit entity: {0}")]
    Submit(RemoteError),

    #[error("recovery cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Operation("disk full".to_string());
        assert_eq!(err.to_string(), "storage operation failed: disk full");
        assert_eq!(
            StoreError::Unavailable.to_string(),
            "storage backend unavailable"
        );
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Unavailable("503".to_string());
        assert_eq!(err.to_string(), "remote service unavailable: 503");
        assert_eq!(RemoteError::NotFound.to_string(), "entity not found");
    }

    #[test]
    fn test_draft_error_display() {
        let err = DraftError::Save(RemoteError::Rejected("name taken".to_string()));
        assert_eq!(
            err.to_string(),
            "could not save entity: remote service rejected the request: name taken"
        );
        assert_eq!(DraftError::Cancelled.to_string(), "recovery cancelled");
    }
}
