//! Error types for the client-side state layer.
//!
//! None of these escape the store's mutation operations: storage and
//! snapshot errors are logged and swallowed so the in-memory state stays
//! authoritative. [`ContextError`] is the exception and is returned to
//! callers that reach for a context before it was provisioned.

/// Errors raised by a [`DurableStorage`](crate::storage::DurableStorage)
/// backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded writing {key:?}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// Total bytes the storage would hold after the write.
        needed: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding a persisted store snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot is not valid JSON or does not match the schema.
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The snapshot was written by a newer schema this build cannot read.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u64),

    /// The snapshot has an unexpected shape.
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// A context was read before its provider initialised it.
///
/// This is a programming error in the presentation layer; callers
/// should surface it immediately rather than substitute a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The named context has no provider yet.
    #[error("{0} accessed before its provider was initialised")]
    NotProvisioned(&'static str),
}
