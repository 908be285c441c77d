use crate::models::system::SystemInfo;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};

/// Get system information
#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Server information", body = SystemInfo)
    )
)]
#[axum::debug_handler]
pub async fn get_system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let info = SystemInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        lesson_count: state.lessons.len(),
        hints_enabled: state.hints.is_enabled(),
        todo_count: state.todos.list().await.len(),
        active_sessions: state.drafts.session_count(),
    };

    Json(info)
}

/// Health check endpoint for container health monitoring
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
