use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use lessonbox_core::{
    config::AppConfig,
    evaluator::{Evaluator, PythonEvaluator},
    hint::HintService,
    lesson::LessonStore,
    todo::{InMemoryTodoRepository, TodoRepository},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::create_router;
use crate::session::DraftStore;
use crate::templates::Templates;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Lessons, evaluator and hint settings
    pub app: AppConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            app: AppConfig::default(),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub lessons: Arc<LessonStore>,
    pub evaluator: Arc<dyn Evaluator>,
    pub hints: HintService,
    pub todos: Arc<dyn TodoRepository>,
    pub templates: Templates,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new(
        lessons: LessonStore,
        evaluator: Arc<dyn Evaluator>,
        hints: HintService,
        todos: Arc<dyn TodoRepository>,
    ) -> tera::Result<Self> {
        Ok(Self {
            lessons: Arc::new(lessons),
            evaluator,
            hints,
            todos,
            templates: Templates::new()?,
            drafts: DraftStore::new(),
        })
    }

    /// Load lessons and wire the default evaluator, hint service and todo store
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let lessons = LessonStore::load(&config.lessons_dir)
            .with_context(|| "Failed to load lessons")?;
        let evaluator = PythonEvaluator::from_config(&config.evaluator);
        info!(
            "Evaluating with {} (timeout {:?}), submissions are not sandboxed",
            evaluator.interpreter(),
            config.evaluator.timeout
        );

        Ok(Self::new(
            lessons,
            Arc::new(evaluator),
            HintService::from_config(&config.hint),
            Arc::new(InMemoryTodoRepository::new()),
        )?)
    }
}

/// The full application: routes, state and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config.app)?;
    info!("Initialized application state");

    let app = create_app(state);

    let addr = format!("{}:{}", config.host, config.port)
        .parse::<SocketAddr>()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
