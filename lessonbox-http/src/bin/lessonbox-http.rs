use clap::Parser;
use lessonbox_core::config::{self, AppConfig};
use lessonbox_http::{self, server::ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// lessonbox HTTP server: Python lessons and a todo API
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "LESSONBOX_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "LESSONBOX_PORT")]
    port: u16,

    /// Configuration file (JSON)
    #[arg(short, long, env = "LESSONBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing lesson files, overrides the config file
    #[arg(short = 'd', long, env = "LESSONBOX_LESSONS_DIR")]
    lessons_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace), overridden by RUST_LOG
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level.clone().into()))
        .with(fmt::layer())
        .init();

    let mut app: AppConfig = match &cli.config {
        Some(path) => config::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = cli.lessons_dir {
        app.lessons_dir = dir;
    }

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        app,
    };

    println!(
        "Starting lessonbox HTTP server on {}:{}",
        config.host, config.port
    );
    lessonbox_http::start_with_config(config).await
}
