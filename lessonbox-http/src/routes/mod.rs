pub mod lessons;
pub mod swagger;
pub mod todos;

use crate::handlers::{get_system_info, health_check};
use crate::server::AppState;
use axum::{Router, routing::get};
use swagger::ApiDoc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main router with state
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .route("/api/info", get(get_system_info))
        .merge(lessons::routes())
        .merge(todos::routes())
}
