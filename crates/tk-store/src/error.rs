//! Error types for store operations.

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or importing account data.
///
/// Migration-time parse failures never surface through this type; the
/// pipeline absorbs them and degrades the offending source to absent.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An underlying I/O failure in a file-backed store.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted value could not be parsed.
    #[error("malformed data under key \"{key}\": {source}")]
    MalformedData {
        /// The storage key that failed to parse.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An import payload is not a structured document with a version field.
    #[error("unrecognized import format: {0}")]
    UnrecognizedImportFormat(String),
}
