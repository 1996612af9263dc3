//! CRUD operations for [`Todo`] records.

use chrono::Utc;
use uuid::Uuid;

use confab_shared::UserId;

use crate::error::{Result, StoreError};
use crate::models::Todo;
use crate::store::Store;

impl Store {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Add a todo for `user_id` with an auto-assigned document id.
    pub async fn add_todo(&self, user_id: &UserId, title: &str, description: &str) -> Result<Todo> {
        self.ensure_writable()?;

        let todo = Todo {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            created_at: Utc::now(),
        };

        let mut todos = self.inner.todos.write().await;
        todos.push(todo.clone());
        tracing::debug!(user = %user_id, todo_id = %todo.id, "todo added");
        Ok(todo)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Equality-filter on the `user_id` field, insertion order.
    pub async fn todos_for(&self, user_id: &UserId) -> Result<Vec<Todo>> {
        self.ensure_readable()?;

        let todos = self.inner.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Set the `completed` flag of an existing todo by document reference.
    pub async fn set_todo_completed(&self, todo_id: Uuid, completed: bool) -> Result<()> {
        self.ensure_writable()?;

        let mut todos = self.inner.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or(StoreError::NotFound)?;
        todo.completed = completed;
        tracing::debug!(todo_id = %todo_id, completed, "todo updated");
        Ok(())
    }
}
