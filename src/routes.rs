//! Router assembly: ops probes, the /api surface, CORS, and the static frontend.

use crate::handlers::{
    bills, dashboard, doctors, drugs, employees, patients, pharmacies, prescriptions, reports,
};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1")
        .fetch_optional(&state.pool)
        .await
        .is_err()
    {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ops probes: GET /health, GET /ready (with database check), GET /version.
pub fn ops_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

/// Resource routes, mounted under /api by [`app`].
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:pid",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/patients/:pid/prescriptions",
            get(patients::patient_prescriptions),
        )
        .route("/patients/:pid/spending", get(patients::patient_spending))
        .route(
            "/doctors",
            get(doctors::list_doctors).post(doctors::create_doctor),
        )
        .route(
            "/doctors/:doc_id/prescription-count",
            get(doctors::prescription_count),
        )
        .route(
            "/pharmacies",
            get(pharmacies::list_pharmacies).post(pharmacies::create_pharmacy),
        )
        .route("/pharmacies/:phar_id/drug-count", get(pharmacies::drug_count))
        .route("/drugs", get(drugs::list_drugs).post(drugs::create_drug))
        .route("/drugs/below-price/:threshold", get(drugs::below_price))
        .route("/drugs/update-price", put(drugs::update_price))
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/bills", get(bills::list_bills).post(bills::create_bill))
        .route(
            "/reports/monthly-sales/:month/:year",
            get(reports::monthly_sales),
        )
        .route("/prescriptions", post(prescriptions::create_prescription))
        .route("/dashboard/stats", get(dashboard::stats))
        .with_state(state)
}

/// Assembled application: everything under /api, any other path served from
/// the static frontend directory.
pub fn app(state: AppState, static_dir: &str) -> Router {
    let api = Router::new()
        .merge(ops_routes(state.clone()))
        .merge(api_routes(state));
    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
