//! Interactive prompt: reads one intent per line and re-renders after each.

use client_core::{TaskListController, TaskListState, TaskService};
use shared::domain::TaskId;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::view;

pub const HELP: &str = "\
commands:
  list              reload tasks from the service
  add <title>       create a task
  done <id>         mark a pending task completed
  rm <id>           delete a task
  help              show this message
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    Add(String),
    Complete(TaskId),
    Delete(TaskId),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => ShellCommand::Refresh,
        "add" | "new" => ShellCommand::Add(rest.to_string()),
        "done" | "complete" => ShellCommand::Complete(parse_id(rest)?),
        "rm" | "delete" => ShellCommand::Delete(parse_id(rest)?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    let raw = raw.trim_start_matches('#');
    raw.parse::<i64>()
        .map(TaskId)
        .map_err(|_| format!("expected a task id, got '{raw}'"))
}

/// Completion is only offered for tasks not already shown as completed.
pub fn check_completable(state: &TaskListState, id: TaskId) -> Result<(), String> {
    match state.task(id) {
        Some(task) if task.status.is_completed() => {
            Err(format!("task #{id} is already completed"))
        }
        _ => Ok(()),
    }
}

pub enum Flow {
    Render,
    Message(String),
    Quit,
}

pub async fn execute<S: TaskService>(
    controller: &TaskListController<S>,
    command: ShellCommand,
) -> Flow {
    match command {
        ShellCommand::Refresh => controller.load().await,
        ShellCommand::Add(title) => {
            controller.set_draft(title).await;
            controller.submit_draft().await;
        }
        ShellCommand::Complete(id) => {
            if let Err(message) = check_completable(&controller.snapshot().await, id) {
                return Flow::Message(message);
            }
            controller.complete_task(id).await;
        }
        ShellCommand::Delete(id) => controller.delete_task(id).await,
        ShellCommand::Help => return Flow::Message(HELP.to_string()),
        ShellCommand::Quit => return Flow::Quit,
    }
    Flow::Render
}

pub async fn run<S: TaskService>(controller: &TaskListController<S>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout
        .write_all(view::render(&controller.snapshot().await, &chrono::Local).as_bytes())
        .await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => match execute(controller, command).await {
                Flow::Render => view::render(&controller.snapshot().await, &chrono::Local),
                Flow::Message(message) => format!("{message}\n"),
                Flow::Quit => break,
            },
            Err(message) => format!("{message}\n"),
        };
        stdout.write_all(output.as_bytes()).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
