use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use lessonbox_core::todo::{Todo, TodoId, TodoPatch};
use serde_json::Value;

use crate::error::{AppError, TODO_NOT_FOUND};
use crate::models::CreateTodoRequest;
use crate::server::AppState;

/// List todos
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todos in id order", body = Vec<Todo>)
    )
)]
#[axum::debug_handler]
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.todos.list().await)
}

/// Create todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Missing task", body = crate::models::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let task = payload
        .ok()
        .and_then(|Json(request)| request.task)
        .ok_or_else(|| AppError::BadRequest("Missing task".to_string()))?;

    let todo = state.todos.create(task).await;
    tracing::info!("Created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Get todo
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 404, description = "Todo not found", body = crate::models::ErrorResponse)
    ),
    params(
        ("id" = u64, Path, description = "Todo identifier")
    )
)]
#[axum::debug_handler]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let todo = state.todos.get(parse_id(&id)?).await?;
    Ok(Json(todo))
}

/// Update todo
///
/// Replaces `task` and/or `completed`; absent fields keep their value. An
/// empty object is rejected as an invalid payload.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    request_body = TodoPatch,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Invalid payload", body = crate::models::ErrorResponse),
        (status = 404, description = "Todo not found", body = crate::models::ErrorResponse)
    ),
    params(
        ("id" = u64, Path, description = "Todo identifier")
    )
)]
#[axum::debug_handler]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id)?;
    // An unknown id wins over a bad payload
    state.todos.get(id).await?;

    let Json(body) = payload.map_err(|e| invalid_payload(&e))?;
    // An empty object carries no update
    if body.as_object().is_none_or(|fields| fields.is_empty()) {
        return Err(invalid_payload(&"empty body"));
    }
    let patch: TodoPatch = serde_json::from_value(body).map_err(|e| invalid_payload(&e))?;

    let todo = state.todos.update(id, patch).await?;
    Ok(Json(todo))
}

/// Delete todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = crate::models::ErrorResponse)
    ),
    params(
        ("id" = u64, Path, description = "Todo identifier")
    )
)]
#[axum::debug_handler]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.todos.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn invalid_payload(reason: &dyn std::fmt::Display) -> AppError {
    tracing::debug!("Rejected todo update: {}", reason);
    AppError::BadRequest("Invalid payload".to_string())
}

/// Non-numeric ids cannot exist, so they are reported like unknown ones
fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(TODO_NOT_FOUND.to_string()))
}
