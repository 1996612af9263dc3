//! Authenticated session state.
//!
//! Wraps the auth collaborator's "current principal" accessor and its
//! session-change notification (sign-in, sign-out, initial restore) in a
//! watch channel, so screens can both read the current user and react to
//! changes.

use tokio::sync::watch;

use confab_shared::Principal;

use crate::error::{ClientError, Result};

/// Shared session handle. Clones observe the same sign-in state.
#[derive(Clone)]
pub struct Session {
    tx: watch::Sender<Option<Principal>>,
}

impl Session {
    /// Start signed out.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Record a sign-in (or session restore) and notify watchers.
    pub fn sign_in(&self, principal: Principal) {
        tracing::info!(user = %principal.user_id, "signed in");
        self.tx.send_replace(Some(principal));
    }

    /// Clear the session and notify watchers.
    pub fn sign_out(&self) {
        if let Some(principal) = self.tx.send_replace(None) {
            tracing::info!(user = %principal.user_id, "signed out");
        }
    }

    /// The currently authenticated principal, if any.
    pub fn current(&self) -> Option<Principal> {
        self.tx.borrow().clone()
    }

    /// The current principal, or [`ClientError::SignedOut`] for screens
    /// that cannot render without one.
    pub fn require(&self) -> Result<Principal> {
        self.current().ok_or(ClientError::SignedOut)
    }

    /// Subscribe to session changes. The receiver yields the new value on
    /// every sign-in and sign-out.
    pub fn watch(&self) -> watch::Receiver<Option<Principal>> {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_and_out_are_observable() {
        let session = Session::new();
        assert!(session.current().is_none());

        let mut rx = session.watch();

        session.sign_in(Principal::from("u1"));
        rx.changed().await.unwrap();
        assert_eq!(session.current(), Some(Principal::from("u1")));

        session.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn require_rejects_signed_out_sessions() {
        let session = Session::new();
        assert_eq!(session.require(), Err(ClientError::SignedOut));

        session.sign_in(Principal::from("u1"));
        assert_eq!(session.require(), Ok(Principal::from("u1")));
    }

    #[tokio::test]
    async fn clones_share_the_same_session() {
        let session = Session::new();
        let clone = session.clone();

        session.sign_in(Principal::from("u1"));
        assert_eq!(clone.current(), Some(Principal::from("u1")));
    }
}
