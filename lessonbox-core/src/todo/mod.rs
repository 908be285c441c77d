//! Todo records behind an injectable repository.

pub mod memory;

pub use memory::InMemoryTodoRepository;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub type TodoId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    pub id: TodoId,
    pub task: String,
    pub completed: bool,
}

/// Fields to replace on an existing todo; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(task) = &self.task {
            todo.task = task.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Todo not found: {0}")]
    NotFound(TodoId),
}

pub type TodoResult<T> = Result<T, TodoError>;

/// Storage for todos.
///
/// Ids are assigned by the repository, increase monotonically and are never
/// reused, even after the todo holding them is deleted.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos in id order
    async fn list(&self) -> Vec<Todo>;

    /// Store a new, not yet completed todo under the next id
    async fn create(&self, task: String) -> Todo;

    async fn get(&self, id: TodoId) -> TodoResult<Todo>;

    async fn update(&self, id: TodoId, patch: TodoPatch) -> TodoResult<Todo>;

    async fn delete(&self, id: TodoId) -> TodoResult<()>;
}
