use crate::handlers::{get_hint, home, submit_lesson, view_lesson};
use crate::server::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Create the lesson routes with state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/lesson/{lesson_id}", get(view_lesson))
        .route("/lesson/{lesson_id}/submit", post(submit_lesson))
        .route("/lesson/{lesson_id}/get_hint", post(get_hint))
}
