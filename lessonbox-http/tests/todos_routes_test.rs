use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use lessonbox_core::todo::Todo;
use lessonbox_http::{models::CreateTodoRequest, server::create_app};
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;

use common::create_test_state;

fn app() -> Router {
    create_app(create_test_state())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create(app: &Router, task: &str) -> Todo {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/todos",
            json!(CreateTodoRequest::new(task)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_value(body_json(response).await).unwrap()
}

#[tokio::test]
async fn test_get_todos_initially_empty() {
    let response = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_post_todo_missing_task() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/todos", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "Missing task" }));

    // Not JSON at all
    let response = app
        .oneshot(empty_request("POST", "/todos"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing task");
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let app = app();

    let first = create(&app, "Test task 1").await;
    let second = create(&app, "Test task 2").await;

    assert_eq!(
        first,
        Todo {
            id: 1,
            task: "Test task 1".to_string(),
            completed: false
        }
    );
    assert!(second.id > first.id);

    let response = app.oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<Todo> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(todos, vec![first, second]);
}

#[tokio::test]
async fn test_get_specific_todo() {
    let app = app();
    let todo = create(&app, "Specific Task").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/todos/{}", todo.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(todo));

    let response = app
        .oneshot(empty_request("GET", "/todos/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Todo not found" }));
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let response = app()
        .oneshot(empty_request("GET", "/todos/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_updates_task_and_completion() {
    let app = app();
    let todo = create(&app, "Original Task").await;
    let uri = format!("/todos/{}", todo.id);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "task": "Updated Task" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["task"], "Updated Task");
    assert_eq!(updated["id"], todo.id);
    assert_eq!(updated["completed"], false);

    let response = app
        .oneshot(json_request("PUT", &uri, json!({ "completed": true })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["task"], "Updated Task");
}

#[tokio::test]
async fn test_put_invalid_payload() {
    let app = app();
    let todo = create(&app, "Task").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}", todo.id),
            json!({ "completed": "yes" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "Invalid payload" }));
}

#[tokio::test]
async fn test_put_empty_object_is_invalid() {
    let app = app();
    let todo = create(&app, "Task").await;
    let uri = format!("/todos/{}", todo.id);

    for body in [json!({}), json!([]), json!(null)] {
        let response = app
            .clone()
            .oneshot(json_request("PUT", &uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid payload" }));
    }

    // The todo is left untouched
    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(body_json(response).await["task"], "Task");
}

#[tokio::test]
async fn test_put_non_existent_todo() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/todos/999",
            json!({ "task": "Try to update non-existent" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Todo not found");
}

#[tokio::test]
async fn test_delete_todo() {
    let app = app();
    let doomed = create(&app, "Task to delete").await;
    let survivor = create(&app, "Another task").await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/todos/{}", doomed.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/todos/{}", doomed.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(todos, vec![survivor]);

    // Ids are never handed out twice
    let next = create(&app, "New task").await;
    assert_eq!(next.id, 3);
}

#[tokio::test]
async fn test_delete_non_existent_todo_leaves_collection_unchanged() {
    let app = app();
    let todo = create(&app, "Keep me").await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/todos/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Todo not found");

    let response = app.oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<Todo> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(todos, vec![todo]);
}
