//! Plain-text rendering of the controller state.

use std::fmt::{Display, Write as _};

use chrono::TimeZone;
use client_core::TaskListState;
use shared::domain::Task;

const EMPTY_LIST: &str = "No tasks yet. Add one with `add <title>`.";

pub fn render<Tz>(state: &TaskListState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if let Some(error) = state.last_error() {
        let _ = writeln!(out, "error: {error}");
    }
    if state.tasks().is_empty() {
        out.push_str(EMPTY_LIST);
        out.push('\n');
        return out;
    }
    for task in state.tasks() {
        out.push_str(&render_task(task, tz));
        out.push('\n');
    }
    out
}

pub fn render_task<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let marker = if task.status.is_completed() { "[x]" } else { "[ ]" };
    let created = task
        .created_at
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M");
    format!("{marker} #{:<4} {}  ({created})", task.id, task.title)
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
