use crate::handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};
use crate::server::AppState;
use axum::{Router, routing::get};

/// Create the todo routes with state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
