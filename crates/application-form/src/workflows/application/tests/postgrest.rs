use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use super::common::*;
use crate::workflows::application::gateway::{
    application_row, ApplicationStore, StoreGateway, SubmissionGateway,
    SUBMISSION_FALLBACK_MESSAGE,
};
use crate::workflows::application::postgrest::PostgrestStore;

#[derive(Debug, Clone)]
struct CapturedRequest {
    table: String,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeStoreState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: &'static str,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn insert_handler(
    State(state): State<FakeStoreState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state
        .captured
        .lock()
        .expect("capture mutex poisoned")
        .push(CapturedRequest {
            table,
            apikey: header_value(&headers, "apikey"),
            authorization: header_value(&headers, "authorization"),
            prefer: header_value(&headers, "prefer"),
            body,
        });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// Serve a fake REST endpoint answering every insert with `status` and `body`.
async fn spawn_fake_store(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = FakeStoreState {
        captured: captured.clone(),
        status,
        body,
    };
    let app = Router::new()
        .route("/rest/v1/:table", post(insert_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake store");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake store serves");
    });

    (format!("http://{addr}"), captured)
}

fn store(base_url: &str) -> PostgrestStore {
    PostgrestStore::new(base_url, "anon-key", Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn insert_posts_one_row_with_auth_headers() {
    let (base_url, captured) = spawn_fake_store(StatusCode::CREATED, "").await;
    let store = store(&base_url);

    store
        .insert("applications", vec![application_row(&complete_application())])
        .await
        .expect("insert accepted");

    let requests = captured.lock().expect("capture mutex poisoned").clone();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.table, "applications");
    assert_eq!(request.apikey.as_deref(), Some("anon-key"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer anon-key"));
    assert_eq!(request.prefer.as_deref(), Some("return=minimal"));

    let rows = request.body.as_array().expect("array payload");
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_object().expect("row object");
    assert_eq!(row.len(), 14);
    assert_eq!(row["grammar_test"], "youre");
    assert_eq!(row["age"], "30");
}

#[tokio::test]
async fn rejection_carries_store_message_and_status() {
    let (base_url, _captured) = spawn_fake_store(
        StatusCode::CONFLICT,
        r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#,
    )
    .await;

    let error = store(&base_url)
        .insert("applications", vec![application_row(&complete_application())])
        .await
        .expect_err("insert rejected");

    assert_eq!(
        error.message.as_deref(),
        Some("duplicate key value violates unique constraint")
    );
    assert_eq!(error.status, Some(409));
}

#[tokio::test]
async fn rejection_without_message_falls_back_through_gateway() {
    let (base_url, _captured) =
        spawn_fake_store(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;
    let gateway = StoreGateway::new(Arc::new(store(&base_url)));

    let error = gateway
        .submit(&complete_application())
        .await
        .expect_err("insert rejected");

    assert_eq!(error.message(), SUBMISSION_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn unreachable_store_reports_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let error = store(&format!("http://{addr}"))
        .insert("applications", vec![application_row(&complete_application())])
        .await
        .expect_err("connection refused");

    assert!(error.status.is_none());
    assert!(error
        .message
        .as_deref()
        .is_some_and(|message| !message.is_empty()));
}
