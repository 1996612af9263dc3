//! Store handle and connection state.
//!
//! [`Store`] plays the role of the managed document database the client
//! talks to. Collections live in memory behind tokio locks so every
//! operation is async and non-blocking, matching how the real collaborator
//! is consumed. The handle is cheap to clone; all clones share state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use confab_shared::{ConversationId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Message, MessageSnapshot, Todo, UserProfile};

/// Cloneable handle to the document store.
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) inner: Arc<StoreInner>,
}

#[derive(Debug)]
pub(crate) struct StoreInner {
    /// Whether the backend is reachable. Flipped off to exercise the
    /// failure paths of every caller.
    online: AtomicBool,

    /// `conversations/{id}/messages` collections.
    pub(crate) conversations: RwLock<HashMap<ConversationId, ConversationLog>>,

    /// `users` collection, keyed by the queryable `user_id` field.
    pub(crate) users: RwLock<HashMap<UserId, UserProfile>>,

    /// `todos` collection, insertion-ordered.
    pub(crate) todos: RwLock<Vec<Todo>>,
}

/// One conversation's message log plus its live-snapshot channel.
#[derive(Debug)]
pub(crate) struct ConversationLog {
    pub(crate) messages: Vec<Message>,
    pub(crate) next_seq: u64,
    pub(crate) snapshot_tx: watch::Sender<MessageSnapshot>,
}

impl ConversationLog {
    pub(crate) fn new(conversation_id: ConversationId) -> Self {
        let (snapshot_tx, _) = watch::channel(MessageSnapshot::empty(conversation_id));
        Self {
            messages: Vec::new(),
            next_seq: 0,
            snapshot_tx,
        }
    }
}

impl Store {
    /// Create an empty, online store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                online: AtomicBool::new(true),
                conversations: RwLock::new(HashMap::new()),
                users: RwLock::new(HashMap::new()),
                todos: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Toggle backend reachability. While offline every read fails with
    /// [`StoreError::FetchFailure`] and every write with
    /// [`StoreError::WriteFailure`].
    pub fn set_online(&self, online: bool) {
        tracing::debug!(online, "store connectivity changed");
        self.inner.online.store(online, Ordering::SeqCst);
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    pub(crate) fn ensure_readable(&self) -> Result<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::FetchFailure("store unreachable".into()))
        }
    }

    pub(crate) fn ensure_writable(&self) -> Result<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::WriteFailure("store unreachable".into()))
        }
    }

    /// Number of live snapshot subscribers on a conversation. Zero for
    /// conversations that were never materialized.
    pub async fn subscriber_count(&self, conversation_id: &ConversationId) -> usize {
        let conversations = self.inner.conversations.read().await;
        conversations
            .get(conversation_id)
            .map(|log| log.snapshot_tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_store_refuses_reads_and_writes() {
        let store = Store::new();
        assert!(store.is_online());

        store.set_online(false);
        assert_eq!(
            store.ensure_readable(),
            Err(StoreError::FetchFailure("store unreachable".into()))
        );
        assert_eq!(
            store.ensure_writable(),
            Err(StoreError::WriteFailure("store unreachable".into()))
        );

        store.set_online(true);
        assert!(store.ensure_readable().is_ok());
        assert!(store.ensure_writable().is_ok());
    }
}
