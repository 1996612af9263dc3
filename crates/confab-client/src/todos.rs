//! Todo list view-model.
//!
//! Same draft rule as the conversation screen: the title/description
//! inputs are cleared only after the store acknowledges the write, so a
//! failed add leaves everything in place for a retry.

use uuid::Uuid;

use confab_shared::UserId;
use confab_store::{Store, Todo};

use crate::error::{ClientError, Result};

pub struct TodoList {
    store: Store,
    owner: UserId,
    todos: Vec<Todo>,
    title_input: String,
    description_input: String,
    last_error: Option<ClientError>,
}

impl TodoList {
    pub fn new(store: Store, owner: UserId) -> Self {
        Self {
            store,
            owner,
            todos: Vec::new(),
            title_input: String::new(),
            description_input: String::new(),
            last_error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn description_input(&self) -> &str {
        &self.description_input
    }

    pub fn set_inputs(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title_input = title.into();
        self.description_input = description.into();
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Reload the owner's todos. On failure the previous list is kept and
    /// the error is retained for display.
    pub async fn load(&mut self) -> Result<()> {
        match self.store.todos_for(&self.owner).await {
            Ok(todos) => {
                self.todos = todos;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user = %self.owner, error = %e, "todo load failed");
                let err = ClientError::from(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Add a todo from the current inputs. Blank title or description is
    /// rejected before the store is touched; inputs are cleared only on a
    /// successful write.
    pub async fn add(&mut self) -> Result<Todo> {
        if self.title_input.trim().is_empty() || self.description_input.trim().is_empty() {
            return Err(ClientError::BlankTodo);
        }

        match self
            .store
            .add_todo(&self.owner, &self.title_input, &self.description_input)
            .await
        {
            Ok(todo) => {
                self.title_input.clear();
                self.description_input.clear();
                self.last_error = None;
                self.todos.push(todo.clone());
                Ok(todo)
            }
            Err(e) => {
                tracing::warn!(user = %self.owner, error = %e, "todo add failed");
                let err = ClientError::from(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Flip the `completed` flag of one todo and mirror the change
    /// locally.
    pub async fn toggle(&mut self, todo_id: Uuid) -> Result<()> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or(ClientError::Store(confab_store::StoreError::NotFound))?;

        let target = !todo.completed;
        self.store.set_todo_completed(todo_id, target).await?;
        todo.completed = target;
        Ok(())
    }
}
