//! Task list controller: turns user intents into service calls and folds the
//! results into [`TaskListState`].

use std::sync::Arc;

use shared::domain::TaskId;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::ClientError,
    service::TaskService,
    state::{TaskAction, TaskListState},
};

pub const LOAD_FAILED_MESSAGE: &str = "Could not load tasks. Is the backend running?";
pub const CREATE_FAILED_MESSAGE: &str = "Could not create the task.";
pub const UPDATE_FAILED_MESSAGE: &str = "Could not update the task.";
pub const DELETE_FAILED_MESSAGE: &str = "Could not delete the task.";

/// Cloning yields another handle to the same state and service.
///
/// The state lock is only taken around mutations, never across a request, so
/// overlapping operations proceed independently and the last response to
/// arrive decides what is cached.
pub struct TaskListController<S: TaskService> {
    service: Arc<S>,
    state: Arc<Mutex<TaskListState>>,
}

impl<S: TaskService> Clone for TaskListController<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: TaskService> TaskListController<S> {
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<S>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(TaskListState::new())),
        }
    }

    pub async fn snapshot(&self) -> TaskListState {
        self.state.lock().await.clone()
    }

    pub async fn set_draft(&self, title: impl Into<String>) {
        self.state.lock().await.set_draft_title(title);
    }

    /// Replaces the cached list with whatever the service returns.
    pub async fn load(&self) {
        self.begin().await;
        let action = match self.service.list_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks: loaded");
                TaskAction::Loaded(tasks)
            }
            Err(err) => {
                warn!(error = %err, "tasks: load failed");
                TaskAction::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };
        self.apply(action).await;
    }

    /// Creates a task from `title`. Blank input sends nothing and changes nothing.
    pub async fn submit(&self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }

        self.begin().await;
        let action = match self.service.create_task(title).await {
            Ok(task) => {
                info!(task_id = task.id.0, "tasks: created");
                TaskAction::Created(task)
            }
            Err(err) => {
                warn!(error = %err, "tasks: create failed");
                TaskAction::Failed(create_failure_message(&err))
            }
        };
        self.apply(action).await;
    }

    pub async fn submit_draft(&self) {
        let draft = self.state.lock().await.draft_title().to_string();
        self.submit(&draft).await;
    }

    /// Whether `id` is already completed is left to the service to judge.
    pub async fn complete_task(&self, id: TaskId) {
        self.begin().await;
        let action = match self.service.complete_task(id).await {
            Ok(task) => {
                info!(task_id = task.id.0, status = ?task.status, "tasks: updated");
                TaskAction::Updated(id, task)
            }
            Err(err) => {
                warn!(task_id = id.0, error = %err, "tasks: update failed");
                TaskAction::Failed(UPDATE_FAILED_MESSAGE.to_string())
            }
        };
        self.apply(action).await;
    }

    pub async fn delete_task(&self, id: TaskId) {
        self.begin().await;
        let action = match self.service.delete_task(id).await {
            Ok(()) => {
                info!(task_id = id.0, "tasks: deleted");
                TaskAction::Deleted(id)
            }
            Err(err) => {
                warn!(task_id = id.0, error = %err, "tasks: delete failed");
                TaskAction::Failed(DELETE_FAILED_MESSAGE.to_string())
            }
        };
        self.apply(action).await;
    }

    async fn begin(&self) {
        self.state.lock().await.begin_operation();
    }

    async fn apply(&self, action: TaskAction) {
        self.state.lock().await.apply(action);
    }
}

/// The service's own explanation wins; otherwise a generic message.
pub fn create_failure_message(err: &ClientError) -> String {
    err.detail()
        .map(str::to_string)
        .unwrap_or_else(|| CREATE_FAILED_MESSAGE.to_string())
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
