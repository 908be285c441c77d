use clap::{Parser, Subcommand};
use lessonbox_cli::{
    api_client::{ApiError, TodoClient},
    check::{check_solution, render_report},
    config::ClientSettings,
};
use lessonbox_core::{
    Error,
    config::EvaluatorConfig,
    evaluator::PythonEvaluator,
    lesson::LessonStore,
    todo::{Todo, TodoId},
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing lesson files
    #[arg(
        short = 'd',
        long,
        default_value = "lessons",
        env = "LESSONBOX_LESSONS_DIR",
        global = true
    )]
    dir: PathBuf,

    /// API server URL, defaults to the saved setting
    #[arg(long, short = 'u', env = "LESSONBOX_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the CLI settings file
    #[arg(long, env = "LESSONBOX_SETTINGS_DIR", global = true)]
    settings_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available lessons
    Lessons,

    /// Check a solution file against a lesson's tests
    Check(CheckArgs),

    /// Manage todos on a running server
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },

    /// Show or save client settings
    Config {
        /// Check that the server answers at the configured URL
        #[arg(long)]
        test: bool,
    },
}

#[derive(Parser)]
struct CheckArgs {
    /// Lesson identifier
    lesson_id: String,

    /// Python file with the solution
    file: PathBuf,

    /// Python interpreter
    #[arg(long, default_value = "python3", env = "LESSONBOX_PYTHON")]
    python: String,

    /// Evaluation timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum TodoCommands {
    /// List all todos
    List,

    /// Add a todo
    Add {
        /// Task description
        task: String,
    },

    /// Show a single todo
    Show {
        /// Todo ID
        id: TodoId,
    },

    /// Mark a todo as completed
    Done {
        /// Todo ID
        id: TodoId,
    },

    /// Delete a todo
    Rm {
        /// Todo ID
        id: TodoId,
    },
}

fn print_todo(todo: &Todo) {
    let mark = if todo.completed { "x" } else { " " };
    println!("{:>4} [{}] {}", todo.id, mark, todo.task);
}

fn list_lessons(dir: &Path) -> Result<(), Error> {
    let store = LessonStore::load(dir)?;
    if store.is_empty() {
        println!("No lessons found in {}", dir.display());
    }
    for lesson in store.list() {
        println!("{:>4}  {}", lesson.id, lesson.title);
    }
    Ok(())
}

/// Returns whether every test passed
async fn check(args: &CheckArgs, dir: &Path) -> Result<bool, Error> {
    let store = LessonStore::load(dir)?;
    let code = std::fs::read_to_string(&args.file).map_err(|e| {
        Error::internal(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| EvaluatorConfig::default().timeout);
    let evaluator = PythonEvaluator::new(args.python.clone(), timeout);

    let report = check_solution(&store, &args.lesson_id, &code, &evaluator).await?;
    println!("{}", render_report(&report));
    Ok(report.all_passed())
}

async fn handle_todo_commands(cmd: &TodoCommands, client: &TodoClient) -> Result<(), Error> {
    let api_error = |e: ApiError| Error::internal(e.to_string());

    match cmd {
        TodoCommands::List => {
            let todos = client.list().await.map_err(api_error)?;
            if todos.is_empty() {
                println!("No todos");
            }
            todos.iter().for_each(print_todo);
        }
        TodoCommands::Add { task } => {
            let todo = client.create(task).await.map_err(api_error)?;
            print_todo(&todo);
        }
        TodoCommands::Show { id } => {
            let todo = client.get(*id).await.map_err(api_error)?;
            print_todo(&todo);
        }
        TodoCommands::Done { id } => {
            let todo = client.complete(*id).await.map_err(api_error)?;
            print_todo(&todo);
        }
        TodoCommands::Rm { id } => {
            client.delete(*id).await.map_err(api_error)?;
            println!("Todo {} deleted", id);
        }
    }
    Ok(())
}

async fn handle_config_command(cli: &Cli, test: bool) -> Result<(), Error> {
    let settings = ClientSettings::initialize(cli.settings_dir.clone(), cli.api_url.clone());

    if cli.api_url.is_some() {
        let path = settings
            .save()
            .map_err(|e| Error::Config(e.to_string()))?;
        println!("Saved settings to {}", path.display());
    }
    println!("API URL: {}", settings.api_url);

    if test {
        TodoClient::new(&settings.api_url)
            .health_check()
            .await
            .map_err(|e| Error::internal(format!("Server check failed: {}", e)))?;
        println!("Server is reachable");
    }
    Ok(())
}

/// Returns the process exit code
async fn run(cli: &Cli) -> Result<i32, Error> {
    match &cli.command {
        Commands::Lessons => list_lessons(&cli.dir).map(|_| 0),
        Commands::Check(args) => Ok(if check(args, &cli.dir).await? { 0 } else { 1 }),
        Commands::Todo { command } => {
            let settings =
                ClientSettings::initialize(cli.settings_dir.clone(), cli.api_url.clone());
            debug!("Using API at {}", settings.api_url);
            let client = TodoClient::new(&settings.api_url);
            handle_todo_commands(command, &client).await.map(|_| 0)
        }
        Commands::Config { test } => handle_config_command(cli, *test).await.map(|_| 0),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
