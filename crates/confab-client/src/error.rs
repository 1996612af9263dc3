use thiserror::Error;

use confab_shared::ResolveError;
use confab_store::StoreError;

/// Errors surfaced to screens by the client layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Conversation error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Todo title and description are both required.
    #[error("Todo title and description must not be empty")]
    BlankTodo,

    /// An operation that needs a signed-in user ran while signed out.
    #[error("Not signed in")]
    SignedOut,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
