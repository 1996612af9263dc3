//! User directory lookups over the `users` collection.

use confab_shared::UserId;
use confab_store::{Store, StoreError, UserProfile};

use crate::config::ClientConfig;

/// Read/update surface for user profiles.
#[derive(Clone)]
pub struct UserDirectory {
    store: Store,
    page_size: usize,
}

impl UserDirectory {
    pub fn new(store: Store, config: &ClientConfig) -> Self {
        Self {
            store,
            page_size: config.directory_page_size,
        }
    }

    /// Resolve a user's display name by equality filter on `user_id`.
    /// `Ok(None)` means the profile genuinely does not exist; transport
    /// failures come back as errors rather than a silent empty state.
    pub async fn display_name(&self, user_id: &UserId) -> Result<Option<String>, StoreError> {
        match self.store.find_profile(user_id).await {
            Ok(profile) => Ok(profile.map(|p| p.name)),
            Err(e) => {
                tracing::warn!(user = %user_id, error = %e, "display name lookup failed");
                Err(e)
            }
        }
    }

    /// Everyone except the viewer, name-ordered. The users screen never
    /// lists the local user.
    pub async fn visible_users(&self, viewer: &UserId) -> Result<Vec<UserProfile>, StoreError> {
        let mut profiles = self.store.list_profiles().await.map_err(|e| {
            tracing::warn!(error = %e, "user listing failed");
            e
        })?;

        profiles.retain(|p| &p.user_id != viewer);
        if self.page_size > 0 {
            profiles.truncate(self.page_size);
        }
        Ok(profiles)
    }

    /// Store a new profile-image reference for the user.
    pub async fn set_profile_image(
        &self,
        user_id: &UserId,
        image: Option<String>,
    ) -> Result<(), StoreError> {
        self.store
            .update_profile_image(user_id, image)
            .await
            .map_err(|e| {
                tracing::warn!(user = %user_id, error = %e, "profile image update failed");
                e
            })
    }
}
