//! Canonical conversation identity.
//!
//! A direct-message thread has no stored identity of its own: its key is a
//! pure function of the two participant ids. Both participants must derive
//! the same key regardless of which side opens the thread, so the two ids
//! are ordered lexicographically before joining.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::types::UserId;

/// Separator between the two participant ids inside a conversation key.
/// Not expected to occur inside provider-assigned user ids.
pub const CONVERSATION_ID_SEPARATOR: char = '_';

/// Canonical string key for a direct-message conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    /// Derive the conversation key for the unordered pair `{a, b}`.
    ///
    /// The lexicographically smaller id comes first, so
    /// `between(a, b) == between(b, a)` for every pair of distinct ids.
    ///
    /// Empty ids and `a == b` are rejected; a self-conversation has no
    /// meaning in a two-party thread.
    pub fn between(a: &UserId, b: &UserId) -> Result<Self, ResolveError> {
        if a.is_empty() || b.is_empty() {
            return Err(ResolveError::EmptyUserId);
        }
        if a == b {
            return Err(ResolveError::SelfConversation);
        }

        let (first, second) = if a.as_str() < b.as_str() {
            (a, b)
        } else {
            (b, a)
        };

        Ok(Self(format!(
            "{}{}{}",
            first.as_str(),
            CONVERSATION_ID_SEPARATOR,
            second.as_str()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two participant ids embedded in the key, smaller one first.
    pub fn participants(&self) -> (UserId, UserId) {
        match self.0.split_once(CONVERSATION_ID_SEPARATOR) {
            Some((a, b)) => (UserId::from(a), UserId::from(b)),
            // Unreachable for keys built by `between`; kept total anyway.
            None => (UserId::from(self.0.as_str()), UserId::new("")),
        }
    }

    /// Whether `user` is one of the two participants.
    pub fn includes(&self, user: &UserId) -> bool {
        let (a, b) = self.participants();
        &a == user || &b == user
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
