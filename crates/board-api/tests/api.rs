use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use board_api::{AppState, router};
use board_db::{CommentStore, FallbackStore, MemoryStore, SqliteStore, StoreError, StoreKind};
use board_types::models::{Comment, User};

fn memory_app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

fn sqlite_app() -> Router {
    let store = SqliteStore::open_in_memory().unwrap();
    router(AppState::new(Arc::new(FallbackStore::new(store))))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

async fn exercise_comment_lifecycle(app: Router) {
    let (status, body) = send(
        &app,
        post_json("/api/comments", json!({ "author": "Bob", "body": "earlier" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let earlier: Comment = serde_json::from_value(body).unwrap();

    let (status, body) = send(
        &app,
        post_json("/api/comments", json!({ "author": "Alice", "body": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Comment = serde_json::from_value(body).unwrap();
    assert_eq!(created.author, "Alice");
    assert_eq!(created.body, "Hello");
    assert!(created.id > earlier.id);

    let (status, body) = send(&app, get("/api/comments")).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Comment> = serde_json::from_value(body).unwrap();
    assert_eq!(listed, vec![created.clone(), earlier.clone()]);

    let (status, body) = send(&app, delete(&format!("/api/comments/{}", created.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Comment deleted successfully" }));

    let (_, body) = send(&app, get("/api/comments")).await;
    let listed: Vec<Comment> = serde_json::from_value(body).unwrap();
    assert_eq!(listed, vec![earlier]);

    let (status, body) = send(&app, delete(&format!("/api/comments/{}", created.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Comment not found" }));
}

#[tokio::test]
async fn comment_lifecycle_on_memory_store() {
    exercise_comment_lifecycle(memory_app()).await;
}

#[tokio::test]
async fn comment_lifecycle_on_sqlite_store() {
    exercise_comment_lifecycle(sqlite_app()).await;
}

#[tokio::test]
async fn empty_fields_are_rejected_and_not_stored() {
    let app = memory_app();

    for payload in [
        json!({ "author": "", "body": "Hello" }),
        json!({ "author": "Alice", "body": "" }),
        json!({ "author": "Alice" }),
        json!({}),
        json!({ "author": null, "body": "Hello" }),
        json!({ "author": "Alice", "body": null }),
        json!({ "author": 7, "body": "Hello" }),
        Value::Null,
    ] {
        let (status, body) = send(&app, post_json("/api/comments", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "author and body are required fields" }));
    }

    let (_, body) = send(&app, get("/api/comments")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn legacy_field_names_are_accepted() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        post_json("/api/comments", json!({ "name": "Alice", "comment": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], "Alice");
    assert_eq!(body["body"], "Hello");
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn form_encoded_comments_are_accepted() {
    let app = memory_app();
    let (status, body) = send(&app, post_form("/api/comments", "name=Alice&comment=Hello+there")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], "Alice");
    assert_eq!(body["body"], "Hello there");

    let (status, body) = send(&app, post_form("/api/comments", "name=Alice&comment=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "author and body are required fields" }));

    let (_, body) = send(&app, get("/api/comments")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_json_keeps_syntax_rejection() {
    let req = Request::post("/api/comments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"author\":"))
        .unwrap();
    let response = memory_app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn markup_is_stored_verbatim() {
    let app = memory_app();
    let payload = "<script>alert(1)</script>";
    let (status, body) = send(
        &app,
        post_json("/api/comments", json!({ "author": "mallory", "body": payload })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["body"], payload);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let (status, _) = send(&memory_app(), delete("/api/comments/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_listing_includes_passwords() {
    let (status, body) = send(&sqlite_app(), get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);

    let users: Vec<User> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(body[0]["username"], "admin");
    assert_eq!(body[0]["password"], "admin123");
    assert_eq!(body[1]["password"], "password123");
    assert_eq!(body[2]["password"], "secret456");
}

#[tokio::test]
async fn health_reports_store_kind() {
    let (status, body) = send(&memory_app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "store": "memory" }));

    let (_, body) = send(&sqlite_app(), get("/health")).await;
    assert_eq!(body["store"], "sqlite");
}

/// Primary that refuses every query, standing in for a database that
/// dropped its connection after startup.
struct Unreachable;

impl CommentStore for Unreachable {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
        Err(StoreError::Unavailable("connection lost".into()))
    }

    fn create_comment(&self, _: &str, _: &str) -> Result<Comment, StoreError> {
        Err(StoreError::Unavailable("connection lost".into()))
    }

    fn delete_comment(&self, _: i64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection lost".into()))
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unavailable("connection lost".into()))
    }
}

#[tokio::test]
async fn unreachable_store_degrades_with_same_shape() {
    let app = router(AppState::new(Arc::new(FallbackStore::new(Unreachable))));
    exercise_comment_lifecycle(app.clone()).await;

    let (status, body) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["password"], "admin123");
}
