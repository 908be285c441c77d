use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemInfo {
    /// Server version
    pub version: String,

    /// Number of loaded lessons
    pub lesson_count: usize,

    /// Whether the hint endpoint can reach a provider
    pub hints_enabled: bool,

    /// Number of todos currently stored
    pub todo_count: usize,

    /// Visitors with at least one saved draft
    pub active_sessions: usize,
}
