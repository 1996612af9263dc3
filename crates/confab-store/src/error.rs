use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A read could not be served (store unreachable or query rejected).
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// A write could not be durably recorded.
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// The store rejected the operation for this principal.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// An update-by-reference targeted a document that does not exist.
    #[error("Record not found")]
    NotFound,

    /// Message text was empty or whitespace-only.
    #[error("Message text must not be empty")]
    EmptyMessage,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
