use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Task, TaskId},
    protocol::{CreateTaskRequest, ErrorBody},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

/// Remote collection of tasks. The service owns ids, statuses and timestamps.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    async fn create_task(&self, title: &str) -> Result<Task, ClientError>;
    /// Asks the service to move the task to completed. No body is sent.
    async fn complete_task(&self, id: TaskId) -> Result<Task, ClientError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError>;
}

/// [`TaskService`] over the REST endpoints under `{base}/tasks`.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    http: Client,
    base_url: String,
}

impl HttpTaskService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let parsed = Url::parse(raw.trim()).map_err(|source| ClientError::InvalidBaseUrl {
            url: raw.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let url = self.collection_url();
        debug!(%url, "tasks: GET");
        let response = self.http.get(url).send().await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        let url = self.collection_url();
        debug!(%url, title, "tasks: POST");
        let response = self
            .http
            .post(url)
            .json(&CreateTaskRequest {
                title: title.to_string(),
            })
            .send()
            .await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn complete_task(&self, id: TaskId) -> Result<Task, ClientError> {
        let url = self.task_url(id);
        debug!(%url, task_id = id.0, "tasks: PUT");
        let response = self.http.put(url).send().await?;
        decode_json(ensure_success(response).await?).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let url = self.task_url(id);
        debug!(%url, task_id = id.0, "tasks: DELETE");
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable or non-JSON error body just means there is no detail.
    let detail = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message()),
        Err(_) => None,
    };
    Err(ClientError::Status { status, detail })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
