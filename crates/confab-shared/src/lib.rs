//! # confab-shared
//!
//! Types shared between the Confab store and client crates: user and
//! conversation identifiers plus the resolver that derives a canonical
//! conversation key from an unordered pair of users.

pub mod conversation;
pub mod types;

mod error;

pub use conversation::ConversationId;
pub use error::ResolveError;
pub use types::{Principal, UserId};
