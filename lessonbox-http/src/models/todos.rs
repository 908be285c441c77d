use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Todo creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Task description
    #[serde(default)]
    pub task: Option<String>,
}

impl CreateTodoRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: Some(task.into()),
        }
    }
}
