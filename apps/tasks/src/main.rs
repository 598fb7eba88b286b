use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpTaskService, TaskListController};
use shared::domain::TaskId;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;
mod view;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "tasks", about = "Manage the shared task list")]
struct Args {
    /// Base address of the task service; overrides tasks.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all tasks.
    List,
    /// Create a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Mark a task completed.
    Complete { id: i64 },
    /// Delete a task.
    Delete { id: i64 },
    /// Interactive prompt (default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.server_url)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(api_url = %settings.api_url, "tasks: starting");

    let controller = TaskListController::new(HttpTaskService::new(settings.api_url)?);
    controller.load().await;

    match args.command.unwrap_or(Command::Shell) {
        Command::Shell => return shell::run(&controller).await,
        Command::List => {}
        Command::Add { title } => controller.submit(&title.join(" ")).await,
        Command::Complete { id } => {
            let id = TaskId(id);
            shell::check_completable(&controller.snapshot().await, id).map_err(|e| anyhow!(e))?;
            controller.complete_task(id).await;
        }
        Command::Delete { id } => controller.delete_task(TaskId(id)).await,
    }

    let state = controller.snapshot().await;
    print!("{}", view::render(&state, &chrono::Local));
    if state.last_error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
