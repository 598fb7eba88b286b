use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use client_core::ClientError;
use shared::domain::{Task, TaskStatus};

#[derive(Default)]
struct CountingService {
    tasks: Vec<Task>,
    completes: AtomicUsize,
    creates: AtomicUsize,
}

fn task(id: i64, status: TaskStatus) -> Task {
    Task {
        id: TaskId(id),
        title: format!("task {id}"),
        status,
        created_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
    }
}

#[async_trait]
impl TaskService for CountingService {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        Ok(self.tasks.clone())
    }

    async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst) as i64;
        let mut created = task(100 + n, TaskStatus::Pending);
        created.title = title.to_string();
        Ok(created)
    }

    async fn complete_task(&self, id: TaskId) -> Result<Task, ClientError> {
        self.completes.fetch_add(1, Ordering::SeqCst);
        Ok(task(id.0, TaskStatus::Completed))
    }

    async fn delete_task(&self, _id: TaskId) -> Result<(), ClientError> {
        Ok(())
    }
}

#[test]
fn parses_commands_and_aliases() {
    assert_eq!(parse_command("  "), Ok(None));
    assert_eq!(parse_command("ls"), Ok(Some(ShellCommand::Refresh)));
    assert_eq!(
        parse_command("add   Buy milk today "),
        Ok(Some(ShellCommand::Add("Buy milk today".to_string())))
    );
    assert_eq!(
        parse_command("done #3"),
        Ok(Some(ShellCommand::Complete(TaskId(3))))
    );
    assert_eq!(parse_command("RM 4"), Ok(Some(ShellCommand::Delete(TaskId(4)))));
    assert_eq!(parse_command("exit"), Ok(Some(ShellCommand::Quit)));
}

#[test]
fn rejects_unknown_verbs_and_bad_ids() {
    assert!(parse_command("archive 1").is_err());
    assert!(parse_command("done").is_err());
    assert!(parse_command("rm abc").is_err());
}

#[tokio::test]
async fn completed_task_is_not_offered_for_completion() {
    let controller = TaskListController::new(CountingService {
        tasks: vec![task(1, TaskStatus::Completed), task(2, TaskStatus::Pending)],
        ..Default::default()
    });
    controller.load().await;

    let flow = execute(&controller, ShellCommand::Complete(TaskId(1))).await;
    assert!(matches!(flow, Flow::Message(ref m) if m.contains("already completed")));

    let flow = execute(&controller, ShellCommand::Complete(TaskId(2))).await;
    assert!(matches!(flow, Flow::Render));

    let snapshot = controller.snapshot().await;
    assert!(snapshot.tasks().iter().all(|task| task.status.is_completed()));
}

#[tokio::test]
async fn add_goes_through_the_draft() {
    let controller = TaskListController::new(CountingService::default());
    controller.load().await;

    execute(&controller, ShellCommand::Add("Buy milk".to_string())).await;
    execute(&controller, ShellCommand::Add("   ".to_string())).await;

    let state = controller.snapshot().await;
    assert_eq!(state.tasks().len(), 1);
    assert_eq!(state.tasks()[0].title, "Buy milk");
    assert_eq!(state.draft_title(), "   ");
}
