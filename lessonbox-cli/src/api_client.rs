use lessonbox_core::todo::{Todo, TodoId, TodoPatch};
use lessonbox_http::models::{CreateTodoRequest, ErrorResponse};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for a running server's todo API
pub struct TodoClient {
    client: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health_check(&self) -> ApiResult<()> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn list(&self) -> ApiResult<Vec<Todo>> {
        let response = self.client.get(self.todos_url()).send().await?;
        parse(response).await
    }

    pub async fn create(&self, task: &str) -> ApiResult<Todo> {
        let response = self
            .client
            .post(self.todos_url())
            .json(&CreateTodoRequest::new(task))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn get(&self, id: TodoId) -> ApiResult<Todo> {
        let response = self.client.get(self.todo_url(id)).send().await?;
        parse(response).await
    }

    pub async fn update(&self, id: TodoId, patch: &TodoPatch) -> ApiResult<Todo> {
        let response = self
            .client
            .put(self.todo_url(id))
            .json(patch)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn complete(&self, id: TodoId) -> ApiResult<Todo> {
        let patch = TodoPatch {
            task: None,
            completed: Some(true),
        };
        self.update(id, &patch).await
    }

    pub async fn delete(&self, id: TodoId) -> ApiResult<()> {
        let response = self.client.delete(self.todo_url(id)).send().await?;
        check_status(response).await.map(|_| ())
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: TodoId) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(ApiError::Status { status, message })
}

async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    Ok(check_status(response).await?.json::<T>().await?)
}
