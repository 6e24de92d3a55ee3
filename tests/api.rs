//! Router-level tests that run without a database. The pool is built lazily
//! against a port nothing listens on, so handlers that touch it fail fast and
//! exercise the generic error mapping.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pharmacy_api::{app, db, AppState, DbConfig};
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> Router {
    // Port 1 has no listener, so pool acquisition fails fast.
    let cfg = DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        user: "nobody".into(),
        password: String::new(),
        database: "pharmacy_management".into(),
        pool_size: 1,
    };
    let pool = MySqlPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(db::connect_options(&cfg));
    app(AppState { pool }, "frontend")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_without_database() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn version_reports_crate_metadata() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/version")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "pharmacy-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn ready_degrades_when_database_unreachable() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn database_failure_maps_to_generic_error() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/pharmacies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_patient_rejects_missing_required_fields() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/patients")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"first_name":"Asha"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_patient_rejects_non_json_body() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/patients")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("PID=P1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn below_price_threshold_must_be_numeric() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/drugs/below-price/cheap")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn monthly_sales_path_params_must_be_integers() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/reports/monthly-sales/december/2024")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/inventory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
