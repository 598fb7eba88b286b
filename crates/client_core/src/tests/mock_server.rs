//! In-memory task service served over loopback HTTP for tests.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{Task, TaskId, TaskStatus},
    protocol::CreateTaskRequest,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CannedResponse {
    status: StatusCode,
    body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    override_response: Option<CannedResponse>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

pub(crate) const CREATED_AT: &str = "2024-01-01T00:00:00Z";

pub(crate) fn sample_task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        status,
        created_at: CREATED_AT.parse().expect("timestamp"),
    }
}

impl MockBackend {
    pub async fn with_tasks(tasks: Vec<Task>) -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.inner.lock().await;
            inner.next_id = tasks.iter().map(|task| task.id.0).max().unwrap_or(0);
            inner.tasks = tasks;
        }
        backend
    }

    /// Every following request gets this canned response instead of being served.
    /// `body` of `None` sends plain text.
    pub async fn respond_with(&self, status: StatusCode, body: Option<Value>) {
        self.inner.lock().await.override_response = Some(CannedResponse { status, body });
    }

    pub async fn clear_override(&self) {
        self.inner.lock().await.override_response = None;
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.lock().await.tasks.clone()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn spawn(&self) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route("/tasks/:id", put(complete_task).delete(delete_task))
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    async fn record(&self, method: Method, path: String, body: &[u8]) -> Option<Response> {
        let mut inner = self.inner.lock().await;
        inner.requests.push(RecordedRequest {
            method,
            path,
            body: String::from_utf8_lossy(body).into_owned(),
        });
        inner.override_response.clone().map(|canned| match canned.body {
            Some(body) => (canned.status, Json(body)).into_response(),
            None => (canned.status, "Internal Server Error").into_response(),
        })
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Task not found" })),
    )
        .into_response()
}

async fn list_tasks(State(backend): State<MockBackend>) -> Response {
    if let Some(canned) = backend.record(Method::GET, "/tasks".into(), &[]).await {
        return canned;
    }
    Json(backend.tasks().await).into_response()
}

async fn create_task(State(backend): State<MockBackend>, body: Bytes) -> Response {
    if let Some(canned) = backend.record(Method::POST, "/tasks".into(), &body).await {
        return canned;
    }
    let Ok(request) = serde_json::from_slice::<CreateTaskRequest>(&body) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{ "loc": ["body", "title"], "msg": "Field required", "type": "missing" }]
            })),
        )
            .into_response();
    };

    let mut inner = backend.inner.lock().await;
    inner.next_id += 1;
    let task = sample_task(inner.next_id, &request.title, TaskStatus::Pending);
    inner.tasks.push(task.clone());
    (StatusCode::CREATED, Json(task)).into_response()
}

async fn complete_task(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    if let Some(canned) = backend
        .record(Method::PUT, format!("/tasks/{id}"), &body)
        .await
    {
        return canned;
    }
    let mut inner = backend.inner.lock().await;
    match inner.tasks.iter_mut().find(|task| task.id == TaskId(id)) {
        Some(task) => {
            task.status = TaskStatus::Completed;
            Json(task.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_task(State(backend): State<MockBackend>, Path(id): Path<i64>) -> Response {
    if let Some(canned) = backend
        .record(Method::DELETE, format!("/tasks/{id}"), &[])
        .await
    {
        return canned;
    }
    let mut inner = backend.inner.lock().await;
    let before = inner.tasks.len();
    inner.tasks.retain(|task| task.id != TaskId(id));
    if inner.tasks.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
