//! Domain model structs held in the document store.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so records can be handed to a UI layer unchanged.

use chrono::{DateTime, Utc};
use confab_shared::{ConversationId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// A registered user, keyed by the auth-provider-assigned `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier assigned by the auth provider.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Optional reference (URI) to a stored profile picture.
    pub image: Option<String>,
    /// When the profile record was created.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message. Immutable once written; there is no edit or
/// delete operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique document identifier, assigned by the store.
    pub id: Uuid,
    /// The conversation this message is filed under.
    pub conversation_id: ConversationId,
    /// Id of the sending participant.
    pub sender_id: UserId,
    /// User-authored message body (never empty).
    pub text: String,
    /// Write-time instant assigned by the store, never by the caller.
    pub timestamp: DateTime<Utc>,
    /// Per-conversation write sequence number; tie-break for messages
    /// sharing an identical timestamp.
    pub seq: u64,
}

// ---------------------------------------------------------------------------
// MessageSnapshot
// ---------------------------------------------------------------------------

/// A complete, ordered materialization of one conversation's messages,
/// sorted by `timestamp` descending (then `seq` descending).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageSnapshot {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

impl MessageSnapshot {
    pub(crate) fn empty(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            messages: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Todo
// ---------------------------------------------------------------------------

/// A todo item owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique document identifier, assigned by the store.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// Toggled from the list view.
    pub completed: bool,
    /// When the todo was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_camel_case_fields() {
        let id = ConversationId::between(&UserId::from("u1"), &UserId::from("u2")).unwrap();
        let msg = Message {
            id: Uuid::new_v4(),
            conversation_id: id,
            sender_id: UserId::from("u1"),
            text: "hi".into(),
            timestamp: Utc::now(),
            seq: 0,
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["senderId"], "u1");
        assert_eq!(json["conversationId"], "u1_u2");
        assert_eq!(json["text"], "hi");
    }
}
