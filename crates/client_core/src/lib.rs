//! Client side of the task list: HTTP access to the task service and the
//! controller that keeps a local copy of the list in sync with it.

pub mod controller;
pub mod error;
pub mod service;
pub mod state;

pub use controller::TaskListController;
pub use error::ClientError;
pub use service::{HttpTaskService, TaskService};
pub use state::{TaskAction, TaskListState};

#[cfg(test)]
#[path = "tests/mock_server.rs"]
mod mock_server;
