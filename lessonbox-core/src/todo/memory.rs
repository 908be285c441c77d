use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Todo, TodoError, TodoId, TodoPatch, TodoRepository, TodoResult};

#[derive(Debug)]
struct TodoTable {
    todos: BTreeMap<TodoId, Todo>,
    next_id: TodoId,
}

impl Default for TodoTable {
    fn default() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Process-lifetime todo storage
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    table: RwLock<TodoTable>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Vec<Todo> {
        self.table.read().await.todos.values().cloned().collect()
    }

    async fn create(&self, task: String) -> Todo {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let todo = Todo {
            id,
            task,
            completed: false,
        };
        table.todos.insert(id, todo.clone());
        debug!("Created todo {}", id);
        todo
    }

    async fn get(&self, id: TodoId) -> TodoResult<Todo> {
        self.table
            .read()
            .await
            .todos
            .get(&id)
            .cloned()
            .ok_or(TodoError::NotFound(id))
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> TodoResult<Todo> {
        let mut table = self.table.write().await;
        let todo = table.todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        patch.apply(todo);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> TodoResult<()> {
        self.table
            .write()
            .await
            .todos
            .remove(&id)
            .map(|_| debug!("Deleted todo {}", id))
            .ok_or(TodoError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_starts_empty() {
        let repo = InMemoryTodoRepository::new();
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.create("Buy milk".to_string()).await;
        let second = repo.create("Walk dog".to_string()).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.completed);
        assert_eq!(repo.list().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.create("a".to_string()).await;
        let second = repo.create("b".to_string()).await;
        repo.delete(second.id).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let third = repo.create("c".to_string()).await;
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.create("Original Task".to_string()).await;

        let updated = repo
            .update(
                todo.id,
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.task, "Original Task");
        assert!(updated.completed);
        assert_eq!(repo.get(todo.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let repo = InMemoryTodoRepository::new();
        repo.create("keep me".to_string()).await;

        assert_eq!(repo.get(999).await, Err(TodoError::NotFound(999)));
        assert_eq!(
            repo.update(999, TodoPatch::default()).await,
            Err(TodoError::NotFound(999))
        );
        assert_eq!(repo.delete(999).await, Err(TodoError::NotFound(999)));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let repo = Arc::new(InMemoryTodoRepository::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(format!("task {}", i)).await.id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert_eq!(ids.last(), Some(&50));
    }
}
