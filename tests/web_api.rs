//! HTTP surface tests: drive the axum router directly with tower::ServiceExt.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use todo_core::web::{WebServer, TRACE_ID_HEADER};
use todo_core::{JsonFileStore, MemoryStore, Status, ToDo, TodoStore};

fn seeded_app() -> Router {
    let store = MemoryStore::with_todos(vec![
        ToDo::new(1, "a", Status::Started),
        ToDo::new(2, "b", Status::Completed),
    ]);
    WebServer::new(store, "127.0.0.1:0").router()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1024 * 64).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_get_existing() {
    let app = seeded_app();
    let (status, body) = send(&app, request("GET", "/todo/2", None)).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({ "id": 2, "description": "b", "status": "COMPLETED" }));
}

#[tokio::test]
async fn test_get_invalid_id_is_400_with_trace_id() {
    let app = seeded_app();
    let resp = app.clone().oneshot(request("GET", "/todo/abc", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let trace_id = resp.headers()[TRACE_ID_HEADER].to_str().unwrap().to_string();
    let body = axum::body::to_bytes(resp.into_body(), 1024 * 64).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Unable to convert ID: abc"));
    assert!(text.contains(&format!("TraceID: {}", trace_id)));
}

#[tokio::test]
async fn test_padded_id_is_400() {
    let app = seeded_app();
    let (status, body) = send(&app, request("GET", "/todo/%205", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unable to convert ID:  5"));

    let (status, _) = send(&app, request("DELETE", "/todo/1%20", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_is_500() {
    let app = seeded_app();
    let (status, body) = send(&app, request("GET", "/todo/99", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("ToDo with id 99 not found"));
    assert!(body.contains("TraceID: "));
}

#[tokio::test]
async fn test_trace_ids_differ_per_request() {
    let app = seeded_app();
    let first = app.clone().oneshot(request("GET", "/todo/1", None)).await.unwrap();
    let second = app.clone().oneshot(request("GET", "/todo/1", None)).await.unwrap();
    assert_ne!(first.headers()[TRACE_ID_HEADER], second.headers()[TRACE_ID_HEADER]);
}

#[tokio::test]
async fn test_create_assigns_next_id() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/todo",
            Some(json!({ "id": 50, "description": "c", "status": "NOT STARTED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: ToDo = serde_json::from_str(&body).unwrap();
    assert_eq!(created, ToDo::new(3, "c", Status::NotStarted));

    let (status, body) = send(&app, request("GET", "/todo/3", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<ToDo>(&body).unwrap(), created);
}

#[tokio::test]
async fn test_create_invalid_status_is_400() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        request("POST", "/todo", Some(json!({ "description": "c", "status": "done" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Permitted statuses are :- COMPLETED, NOT STARTED, STARTED"));

    let (status, _) = send(&app, request("GET", "/todo/3", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_null_status_is_400() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        request("POST", "/todo", Some(json!({ "description": "c", "status": null }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Status of  is not permitted"));
}

#[tokio::test]
async fn test_create_malformed_body_is_500() {
    let app = seeded_app();
    let req = Request::builder()
        .method("POST")
        .uri("/todo")
        .body(Body::from("{ nope"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Error decoding todo object"));
}

#[tokio::test]
async fn test_update_partial_keeps_missing_fields() {
    let app = seeded_app();

    let (status, _) = send(
        &app,
        request("PUT", "/todo", Some(json!({ "id": 1, "status": "COMPLETED" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request("GET", "/todo/1", None)).await;
    assert_eq!(
        serde_json::from_str::<ToDo>(&body).unwrap(),
        ToDo::new(1, "a", Status::Completed)
    );

    let (status, body) = send(
        &app,
        request("PUT", "/todo", Some(json!({ "id": 1, "description": "renamed", "status": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<ToDo>(&body).unwrap(),
        ToDo::new(1, "renamed", Status::Completed)
    );
}

#[tokio::test]
async fn test_update_null_fields_keep_stored_values() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/todo",
            Some(json!({ "id": 1, "description": null, "status": "COMPLETED" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<ToDo>(&body).unwrap(),
        ToDo::new(1, "a", Status::Completed)
    );

    let (status, body) = send(
        &app,
        request("PUT", "/todo", Some(json!({ "id": 1, "description": "x", "status": null }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<ToDo>(&body).unwrap(),
        ToDo::new(1, "x", Status::Completed)
    );
}

#[tokio::test]
async fn test_update_missing_is_500() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        request("PUT", "/todo", Some(json!({ "id": 7, "description": "x" }))),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Error locating (original) todo with id 7"));
}

#[tokio::test]
async fn test_update_invalid_status_is_400() {
    let app = seeded_app();
    let (status, _) = send(
        &app,
        request("PUT", "/todo", Some(json!({ "id": 2, "status": "Started" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, request("GET", "/todo/2", None)).await;
    assert_eq!(
        serde_json::from_str::<ToDo>(&body).unwrap(),
        ToDo::new(2, "b", Status::Completed)
    );
}

#[tokio::test]
async fn test_delete_flow() {
    let app = seeded_app();

    let (status, body) = send(&app, request("DELETE", "/todo/1", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, request("DELETE", "/todo/1", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, request("DELETE", "/todo/x", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request("POST", "/todo", Some(json!({ "description": "c", "status": "NOT STARTED" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<ToDo>(&body).unwrap().id, 3);
}

#[tokio::test]
async fn test_pages_render() {
    let app = seeded_app();

    let (status, body) = send(&app, request("GET", "/about", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("About this ToDo service"));

    let (status, body) = send(&app, request("GET", "/todolist", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Current To Do Listing"));
    assert!(body.contains("<td>a</td>"));
    assert!(body.contains("<td>COMPLETED</td>"));
    assert!(body.contains("TraceID: "));
}

#[tokio::test]
async fn test_json_file_backed_server() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data").join("todos.json");
    let app = WebServer::new(JsonFileStore::new(&path), "127.0.0.1:0").router();

    let (status, body) = send(&app, request("GET", "/todolist", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Nothing to do."));

    for description in ["one", "two", "three"] {
        let (status, _) = send(
            &app,
            request("POST", "/todo", Some(json!({ "description": description, "status": "STARTED" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&app, request("DELETE", "/todo/2", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let on_disk = JsonFileStore::new(&path).list_all().unwrap();
    let ids: Vec<i64> = on_disk.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let app = WebServer::new(MemoryStore::new(), "127.0.0.1:0").router();

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let req = request(
                "POST",
                "/todo",
                Some(json!({ "description": format!("item {}", i), "status": "STARTED" })),
            );
            app.oneshot(req).await.unwrap().status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, body) = send(&app, request("GET", "/todo/20", None)).await;
    assert_eq!(serde_json::from_str::<ToDo>(&body).unwrap().id, 20);
    let (status, _) = send(&app, request("GET", "/todo/21", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
