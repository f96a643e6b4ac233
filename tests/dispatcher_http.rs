//! HTTP-level tests for the record dispatcher, driven through the full router with a
//! counting in-memory store (no database needed).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shape_rest::model::Thing;
use shape_rest::{build_router, AppError, AppState, Record, RecordStore, RowsAffected, Shape};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;

/// What the mock answers with.
#[derive(Clone, Copy)]
enum Reply {
    Hit,
    Miss,
    Fail,
}

struct MockStore {
    reply: Reply,
    calls: AtomicUsize,
}

impl MockStore {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(MockStore {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T>(&self, hit: T, fail: AppError) -> Result<Option<T>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Hit => Ok(Some(hit)),
            Reply::Miss => Ok(None),
            Reply::Fail => Err(fail),
        }
    }
}

fn thing(id: i64) -> Record {
    Record::Thing(Thing {
        id,
        name: format!("Test Thing {}", id),
        size: 23,
        weight: 34,
    })
}

const ONE_ROW: RowsAffected = RowsAffected { rows_affected: 1 };

#[async_trait]
impl RecordStore for MockStore {
    async fn list_all(&self, _shape: Shape) -> Result<Vec<Record>, AppError> {
        self.answer(vec![thing(1), thing(2), thing(3)], AppError::QueryFailed("down".into()))
            .map(Option::unwrap_or_default)
    }

    async fn get_by_id(&self, _shape: Shape, id: i64) -> Result<Option<Record>, AppError> {
        self.answer(thing(id), AppError::QueryFailed("down".into()))
    }

    async fn insert(&self, _record: &Record) -> Result<Option<RowsAffected>, AppError> {
        self.answer(ONE_ROW, AppError::TransactionFailed("ORA-00001: unique constraint".into()))
    }

    async fn update(&self, _record: &Record) -> Result<Option<RowsAffected>, AppError> {
        self.answer(ONE_ROW, AppError::TransactionFailed("value too large".into()))
    }

    async fn delete(&self, _shape: Shape, _id: i64) -> Result<Option<RowsAffected>, AppError> {
        self.answer(ONE_ROW, AppError::TransactionFailed("connection lost".into()))
    }
}

async fn send(store: Arc<MockStore>, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let app = build_router(AppState::new(store));
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn list_returns_all_records() {
    let store = MockStore::new(Reply::Hit);
    let (status, body) = send(store.clone(), Method::GET, "/things", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body).as_array().unwrap().len(), 3);
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn list_of_unknown_tag_is_404_without_store_call() {
    let store = MockStore::new(Reply::Hit);
    for uri in ["/dddd", "/number"] {
        let (status, _) = send(store.clone(), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn list_read_failure_is_empty_500() {
    let store = MockStore::new(Reply::Fail);
    let (status, body) = send(store, Method::GET, "/wings", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_by_id_found_and_missing() {
    let (status, body) = send(MockStore::new(Reply::Hit), Method::GET, "/things/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!({"id": 1, "name": "Test Thing 1", "size": 23, "weight": 34})
    );

    let (status, body) = send(MockStore::new(Reply::Miss), Method::GET, "/things/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn invalid_ids_are_400_and_never_reach_store() {
    let store = MockStore::new(Reply::Hit);
    for id in ["-1", "abc", "1.5", "-100"] {
        let (status, _) = send(store.clone(), Method::GET, &format!("/things/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {id}");
        let (status, _) = send(store.clone(), Method::DELETE, &format!("/things/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE {id}");
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn insert_succeeds_with_rows_affected() {
    let store = MockStore::new(Reply::Hit);
    let body = json!({"id": 99, "name": "Test Thing 4", "size": 22, "weight": 33});
    let (status, resp) = send(store.clone(), Method::POST, "/things", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&resp), json!({"rowsAffected": 1}));
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn malformed_bodies_are_400_without_store_call() {
    let store = MockStore::new(Reply::Hit);
    let bad = [
        json!({}),
        json!({"id": 99, "name": "Test Thing 4"}),
        json!({"id": 99, "name": "x", "type": "jet", "size": 1, "weight": 2}),
        json!("not an object"),
    ];
    for body in bad {
        let (status, _) = send(store.clone(), Method::POST, "/things", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "POST {body}");
        let (status, _) = send(store.clone(), Method::PUT, "/things", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT {body}");
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn unparseable_json_is_400() {
    let store = MockStore::new(Reply::Hit);
    let app = build_router(AppState::new(store.clone()));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/wings")
        .header("content-type", "application/json")
        .body(Body::from("{\"id\": 1,"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn write_to_unknown_tag_is_404() {
    let store = MockStore::new(Reply::Hit);
    let body = json!({"id": 1, "name": "a", "size": 1, "weight": 2});
    let (status, _) = send(store.clone(), Method::POST, "/gadgets", Some(body.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(store.clone(), Method::PUT, "/gadgets", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn write_failure_is_400_with_error_message() {
    let body = json!({"id": 99, "name": "Test Thing 4", "size": 22, "weight": 33});
    let (status, resp) = send(MockStore::new(Reply::Fail), Method::POST, "/things", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&resp), json!({"error": "ORA-00001: unique constraint"}));

    let (status, resp) = send(MockStore::new(Reply::Fail), Method::PUT, "/things", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&resp), json!({"error": "value too large"}));
}

#[tokio::test]
async fn update_of_absent_record_is_404() {
    let body = json!({"id": 5, "name": "w", "type": "jet"});
    let (status, resp) = send(MockStore::new(Reply::Miss), Method::PUT, "/wings", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(resp.is_empty());
}

#[tokio::test]
async fn delete_outcomes() {
    let (status, resp) = send(MockStore::new(Reply::Hit), Method::DELETE, "/things/99", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&resp), json!({"rowsAffected": 1}));

    let (status, _) = send(MockStore::new(Reply::Miss), Method::DELETE, "/things/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, resp) = send(MockStore::new(Reply::Fail), Method::DELETE, "/things/99", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&resp), json!({"error": "connection lost"}));
}

#[tokio::test]
async fn unmatched_routes_fall_back_to_plain_404() {
    let store = MockStore::new(Reply::Hit);
    for (method, uri) in [
        (Method::GET, "/things/1/extra"),
        (Method::PATCH, "/things"),
        (Method::POST, "/things/1"),
        (Method::POST, "/health"),
        (Method::DELETE, "/version"),
    ] {
        let (status, body) = send(store.clone(), method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body, b"no route defined");
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn health_is_served() {
    let (status, body) = send(MockStore::new(Reply::Hit), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "ok"}));
}

#[tokio::test]
async fn writes_without_reachable_database_are_500() {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://u:p@127.0.0.1:1/none")
        .unwrap();
    let state = AppState::from_pool(pool);
    let body = json!({"id": 99, "name": "Test Thing 4", "size": 22, "weight": 33});
    for method in [Method::POST, Method::PUT] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/things")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{method}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(json_of(&bytes).get("error").is_some(), "{method}");
    }
}
