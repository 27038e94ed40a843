//! Integration tests for survival-api HTTP endpoints
//!
//! Tests cover:
//! - Welcome and health routes
//! - POST /sobreviventes success, validation (422) and malformed bodies
//! - GET /sobreviventes list shape
//! - GET /sobreviventes/:id found / not found (404)
//! - DELETE /sobreviventes/:id found / not found (404)
//! - Scoring failure (500) with cause in detail
//! - SQLite-backed store behind the router

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use survival_api::model::{ArtifactClassifier, ArtifactSource, LogisticModel};
use survival_api::store::{MemoryRecordStore, SqliteRecordStore};
use survival_api::{build_router, AppState, PassengerService};
use survival_common::events::EventLog;
use tower::ServiceExt; // for `oneshot`

fn model() -> LogisticModel {
    LogisticModel::new(
        [-0.0395, -0.0921, -0.3517, 0.0021, -1.0983, -2.6143, -0.0874, -0.4212],
        4.8871,
    )
}

/// Test helper: app over an in-memory store
fn setup_app() -> Router {
    let service = PassengerService::new(
        Arc::new(model()),
        Arc::new(MemoryRecordStore::new()),
        EventLog::default(),
    );
    build_router(AppState::new(service))
}

/// Test helper: build a request with optional JSON body
fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: send a request, return status and JSON body
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, body)
}

async fn create(app: &Router, features: Value) -> (StatusCode, Value) {
    send(
        app,
        request("POST", "/sobreviventes", Some(json!({ "caracteristicas": features }))),
    )
    .await
}

// =============================================================================
// Welcome / Health
// =============================================================================

#[tokio::test]
async fn test_index_returns_welcome_string() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("survival probability"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "survival-api");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_number());
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_then_get_same_probability() {
    let app = setup_app();

    let (status, created) = create(&app, json!([22.5, 0, 1, 54.3, 2, 0, 0, 1])).await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_str().expect("id should be a string");
    let probability = created["probabilidade_sobrevivencia"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&probability));

    let (status, fetched) = send(&app, request("GET", &format!("/sobreviventes/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["probabilidade_sobrevivencia"].as_f64().unwrap(), probability);
}

#[tokio::test]
async fn test_create_wrong_length_is_422() {
    let app = setup_app();

    let (status, body) = create(&app, json!([22.5, 0, 1])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["detail"],
        "Número de características inválido. Esperado 8 características."
    );
}

#[tokio::test]
async fn test_create_invalid_pclass_is_422_and_not_persisted() {
    let app = setup_app();

    let (status, body) = create(&app, json!([22.5, 0, 1, 54.3, 5, 0, 0, 1])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Características inválidas.");

    let (_, list) = send(&app, request("GET", "/sobreviventes", None)).await;
    assert_eq!(list["sobreviventes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_malformed_body_is_422() {
    let app = setup_app();

    for body in [json!({}), json!({ "caracteristicas": "abc" }), json!([1, 2, 3])] {
        let (status, response) = send(&app, request("POST", "/sobreviventes", Some(body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response["detail"].is_string());
    }
}

#[tokio::test]
async fn test_create_with_missing_artifact_is_500() {
    let classifier = ArtifactClassifier::new(
        ArtifactSource::Local("/nonexistent/model.json".into()),
        EventLog::default(),
    );
    let service = PassengerService::new(
        Arc::new(classifier),
        Arc::new(MemoryRecordStore::new()),
        EventLog::default(),
    );
    let app = build_router(AppState::new(service));

    let (status, body) = create(&app, json!([22.5, 0, 1, 54.3, 2, 0, 0, 1])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Erro ao calcular a probabilidade de sobrevivência."));
    assert!(detail.contains("/nonexistent/model.json"));
}

// =============================================================================
// List / Get / Delete
// =============================================================================

#[tokio::test]
async fn test_list_contains_created_records() {
    let app = setup_app();
    let (_, a) = create(&app, json!([22.5, 0, 1, 54.3, 2, 0, 0, 1])).await;
    let (_, b) = create(&app, json!([40, 1, 0, 8.05, 3, 1, 0, 1])).await;

    let (status, body) = send(&app, request("GET", "/sobreviventes", None)).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["sobreviventes"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for created in [&a, &b] {
        assert_eq!(items.iter().filter(|item| *item == created).count(), 1);
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = setup_app();
    let (status, body) = send(&app, request("GET", "/sobreviventes/unknown-id", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "ID de passageiro não encontrado.");
}

#[tokio::test]
async fn test_delete_existing_then_missing() {
    let app = setup_app();
    let (_, created) = create(&app, json!([22.5, 0, 1, 54.3, 2, 0, 0, 1])).await;
    let uri = format!("/sobreviventes/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Registro deletado com sucesso.");

    let (status, _) = send(&app, request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "ID de passageiro não encontrado.");
}

// =============================================================================
// SQLite store behind the router
// =============================================================================

#[tokio::test]
async fn test_sqlite_backed_lifecycle() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteRecordStore::with_pool(pool, "sobreviventes").await.unwrap();
    let service = PassengerService::new(Arc::new(model()), Arc::new(store), EventLog::default());
    let app = build_router(AppState::new(service));

    let (status, created) = create(&app, json!([22.5, 0, 1, 54.3, 2, 0, 0, 1])).await;
    assert_eq!(status, StatusCode::OK);
    let uri = format!("/sobreviventes/{}", created["id"].as_str().unwrap());

    let (_, fetched) = send(&app, request("GET", &uri, None)).await;
    assert_eq!(fetched["probabilidade_sobrevivencia"], created["probabilidade_sobrevivencia"]);

    let (_, list) = send(&app, request("GET", "/sobreviventes", None)).await;
    assert_eq!(list["sobreviventes"], json!([created]));

    let (status, _) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
}
