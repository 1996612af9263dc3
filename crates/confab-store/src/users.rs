//! CRUD operations for [`UserProfile`] records in the `users` collection.

use confab_shared::UserId;

use crate::error::{Result, StoreError};
use crate::models::UserProfile;
use crate::store::Store;

impl Store {
    // ------------------------------------------------------------------
    // Create / update
    // ------------------------------------------------------------------

    /// Insert or replace a profile, keyed by `user_id`. Registration
    /// writes this once; later profile edits replace the record.
    pub async fn upsert_profile(&self, profile: UserProfile) -> Result<()> {
        self.ensure_writable()?;

        let mut users = self.inner.users.write().await;
        tracing::debug!(user = %profile.user_id, "profile upserted");
        users.insert(profile.user_id.clone(), profile);
        Ok(())
    }

    /// Update only the profile image reference of an existing user.
    pub async fn update_profile_image(
        &self,
        user_id: &UserId,
        image: Option<String>,
    ) -> Result<()> {
        self.ensure_writable()?;

        let mut users = self.inner.users.write().await;
        let profile = users.get_mut(user_id).ok_or(StoreError::NotFound)?;
        profile.image = image;
        tracing::debug!(user = %user_id, "profile image updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Equality-filter lookup on the `user_id` field.
    pub async fn find_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        self.ensure_readable()?;

        let users = self.inner.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    /// List every profile, ordered by display name.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
        self.ensure_readable()?;

        let users = self.inner.users.read().await;
        let mut profiles: Vec<UserProfile> = users.values().cloned().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(user_id: &str, name: &str) -> UserProfile {
        UserProfile {
            user_id: UserId::from(user_id),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn find_returns_the_upserted_profile() {
        let store = Store::new();
        store.upsert_profile(profile("u1", "Alice")).await.unwrap();

        let found = store.find_profile(&UserId::from("u1")).await.unwrap();
        assert_eq!(found.unwrap().name, "Alice");

        let missing = store.find_profile(&UserId::from("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn listing_orders_by_name() {
        let store = Store::new();
        store.upsert_profile(profile("u2", "Bob")).await.unwrap();
        store.upsert_profile(profile("u1", "Alice")).await.unwrap();

        let names: Vec<String> = store
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn image_update_requires_an_existing_profile() {
        let store = Store::new();
        let err = store
            .update_profile_image(&UserId::from("u1"), Some("file:///a.png".into()))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);

        store.upsert_profile(profile("u1", "Alice")).await.unwrap();
        store
            .update_profile_image(&UserId::from("u1"), Some("file:///a.png".into()))
            .await
            .unwrap();

        let found = store.find_profile(&UserId::from("u1")).await.unwrap();
        assert_eq!(found.unwrap().image.as_deref(), Some("file:///a.png"));
    }
}
