//! Conversation screen view-model.
//!
//! [`ConversationView`] owns everything a DM screen needs: the latest
//! snapshot, the input-field draft, the last error, and exactly one live
//! subscription handle. The handle is released on
//! [`ConversationView::close`] and on drop, so navigating away on any
//! path tears the listener down.

use chrono::{DateTime, TimeZone, Timelike};

use confab_shared::{ConversationId, UserId};
use confab_store::{Message, MessageSubscription, StoreError, SubscriptionState};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::feed::MessageFeed;

#[derive(Debug)]
pub struct ConversationView {
    feed: MessageFeed,
    conversation_id: ConversationId,
    me: UserId,
    subscription: MessageSubscription,
    messages: Vec<Message>,
    draft: String,
    last_error: Option<ClientError>,
    snapshot_limit: usize,
}

impl ConversationView {
    /// Resolve the conversation between `me` and `peer` and open a live
    /// subscription on it.
    pub async fn open(
        feed: MessageFeed,
        me: &UserId,
        peer: &UserId,
        config: &ClientConfig,
    ) -> Result<Self> {
        let conversation_id = ConversationId::between(me, peer)?;
        let subscription = feed.subscribe(&conversation_id).await?;

        Ok(Self {
            feed,
            conversation_id,
            me: me.clone(),
            subscription,
            messages: Vec::new(),
            draft: String::new(),
            last_error: None,
            snapshot_limit: config.snapshot_limit,
        })
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Whether a message was authored by the local user (sent vs received
    /// styling).
    pub fn is_mine(&self, message: &Message) -> bool {
        message.sender_id == self.me
    }

    /// Pull the next snapshot into the view. Resolves immediately the
    /// first time, then once per upstream change. Returns `false` once the
    /// subscription has been released.
    pub async fn refresh(&mut self) -> bool {
        match self.subscription.next_snapshot().await {
            Some(snapshot) => {
                self.messages = snapshot.messages;
                if self.snapshot_limit > 0 {
                    self.messages.truncate(self.snapshot_limit);
                }
                true
            }
            None => false,
        }
    }

    /// Send the current draft.
    ///
    /// The draft is cleared only when the write is acknowledged; on failure
    /// it is preserved so the user can retry, and the error is kept on the
    /// view as the retry affordance.
    pub async fn send_draft(&mut self) -> Result<Message> {
        let text = self.draft.clone();
        match self.feed.send(&self.conversation_id, &self.me, &text).await {
            Ok(message) => {
                self.draft.clear();
                self.last_error = None;
                Ok(message)
            }
            Err(e) => {
                let err = ClientError::from(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Release the subscription. Further [`refresh`](Self::refresh) calls
    /// return `false`. Dropping the view has the same effect.
    pub fn close(&mut self) {
        self.subscription.unsubscribe();
    }

    pub fn subscription_state(&self) -> SubscriptionState {
        self.subscription.state()
    }

    /// The store error behind [`last_error`](Self::last_error), for callers
    /// that branch on the failure kind.
    pub fn last_store_error(&self) -> Option<&StoreError> {
        match self.last_error {
            Some(ClientError::Store(ref e)) => Some(e),
            _ => None,
        }
    }
}

/// Format a message timestamp for display: 12-hour clock without a
/// meridiem suffix ("9:05", "3:41"). Convert to [`chrono::Local`] before
/// calling for wall-clock display.
pub fn format_message_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let (_, hour12) = timestamp.hour12();
    format!("{}:{:02}", hour12, timestamp.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_store::Store;

    async fn open_view(store: &Store, me: &str, peer: &str) -> ConversationView {
        ConversationView::open(
            MessageFeed::new(store.clone()),
            &UserId::from(me),
            &UserId::from(peer),
            &ClientConfig::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn send_appears_on_refresh() -> anyhow::Result<()> {
        let store = Store::new();
        let mut view = open_view(&store, "u1", "u2").await;

        assert!(view.refresh().await);
        assert!(view.messages().is_empty());

        view.set_draft("hi");
        view.send_draft().await?;
        assert_eq!(view.draft(), "");

        assert!(view.refresh().await);
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.messages()[0].text, "hi");
        assert!(view.is_mine(&view.messages()[0]));
        Ok(())
    }

    #[tokio::test]
    async fn failed_send_preserves_the_draft() {
        let store = Store::new();
        let mut view = open_view(&store, "u1", "u2").await;

        store.set_online(false);
        view.set_draft("hi");
        let err = view.send_draft().await.unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::WriteFailure(_))));

        // Input survives so the user can press send again.
        assert_eq!(view.draft(), "hi");
        assert!(view.last_store_error().is_some());

        store.set_online(true);
        view.send_draft().await.unwrap();
        assert_eq!(view.draft(), "");
        assert!(view.last_error().is_none());
    }

    #[tokio::test]
    async fn closing_stops_refresh() {
        let store = Store::new();
        let mut view = open_view(&store, "u1", "u2").await;

        view.close();
        view.close();
        assert_eq!(view.subscription_state(), SubscriptionState::Unsubscribed);
        assert!(!view.refresh().await);
    }

    #[tokio::test]
    async fn dropping_the_view_releases_the_listener() {
        let store = Store::new();
        let view = open_view(&store, "u1", "u2").await;
        let conv = view.conversation_id().clone();

        assert_eq!(store.subscriber_count(&conv).await, 1);
        drop(view);
        assert_eq!(store.subscriber_count(&conv).await, 0);
    }

    #[tokio::test]
    async fn snapshot_limit_caps_retained_messages() {
        let store = Store::new();
        let feed = MessageFeed::new(store.clone());
        let conv = MessageFeed::resolve(&UserId::from("u1"), &UserId::from("u2")).unwrap();
        feed.send(&conv, &UserId::from("u1"), "hi").await.unwrap();
        feed.send(&conv, &UserId::from("u2"), "yo").await.unwrap();

        let config = ClientConfig {
            snapshot_limit: 1,
            ..ClientConfig::default()
        };
        let mut view = ConversationView::open(feed, &UserId::from("u1"), &UserId::from("u2"), &config)
            .await
            .unwrap();

        assert!(view.refresh().await);
        assert_eq!(view.messages().len(), 1);
        // Newest-first ordering means the cap keeps the most recent message.
        assert_eq!(view.messages()[0].text, "yo");
    }

    #[tokio::test]
    async fn self_conversation_cannot_be_opened() {
        let feed = MessageFeed::new(Store::new());
        let err = ConversationView::open(
            feed,
            &UserId::from("u1"),
            &UserId::from("u1"),
            &ClientConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::Resolve(_)));
    }

    #[test]
    fn message_time_formats_without_meridiem() {
        use chrono::Utc;
        let afternoon = Utc.with_ymd_and_hms(2024, 5, 1, 13, 5, 0).unwrap();
        assert_eq!(format_message_time(&afternoon), "1:05");

        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 9, 41, 0).unwrap();
        assert_eq!(format_message_time(&morning), "9:41");
    }
}
