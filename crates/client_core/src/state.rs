//! Cached task list and the reducer that reconciles it with service results.

use shared::domain::{Task, TaskId};
use tracing::warn;

/// Outcome of one service round trip, applied to [`TaskListState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Loaded(Vec<Task>),
    Created(Task),
    /// The id the update was requested for, and the task the service returned.
    Updated(TaskId, Task),
    Deleted(TaskId),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    tasks: Vec<Task>,
    draft_title: String,
    last_error: Option<String>,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in display order: insertion order, never resorted.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Every operation starts by dropping the previous failure.
    pub fn begin_operation(&mut self) {
        self.last_error = None;
    }

    pub fn apply(&mut self, action: TaskAction) {
        match action {
            TaskAction::Loaded(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
            }
            TaskAction::Created(task) => {
                match self.position(task.id) {
                    Some(index) => self.tasks[index] = task,
                    None => self.tasks.push(task),
                }
                self.draft_title.clear();
            }
            TaskAction::Updated(requested, task) => {
                let Some(index) = self.position(requested) else {
                    return;
                };
                let returned = task.id;
                self.tasks[index] = task;
                if returned != requested {
                    warn!(
                        requested = requested.0,
                        returned = returned.0,
                        "tasks: service returned a different task for update"
                    );
                    let mut position = 0;
                    self.tasks.retain(|cached| {
                        let keep = position == index || cached.id != returned;
                        position += 1;
                        keep
                    });
                }
            }
            TaskAction::Deleted(id) => self.tasks.retain(|task| task.id != id),
            TaskAction::Failed(message) => self.last_error = Some(message),
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
