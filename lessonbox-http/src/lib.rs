//! lessonbox HTTP server
//!
//! Serves the lesson pages (HTML), the hint endpoint and the todo API (JSON).

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod session;
pub mod templates;

use server::{ServerConfig, start_server};

/// Start the lessonbox HTTP server with the default configuration
pub async fn start() -> anyhow::Result<()> {
    start_server(ServerConfig::default()).await
}

/// Start the lessonbox HTTP server with a custom configuration
pub async fn start_with_config(config: ServerConfig) -> anyhow::Result<()> {
    start_server(config).await
}
