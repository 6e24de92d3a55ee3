//! Dashboard stats: entity counts, revenue, and the latest bills in one payload.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// GET /api/dashboard/stats — each count/sum key holds its full result set
/// (an array with one row), mirroring what the dashboard frontend indexes into.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut out = serde_json::Map::new();

    let scalars = [
        ("totalPatients", "SELECT COUNT(*) AS count FROM patient"),
        ("totalDoctors", "SELECT COUNT(*) AS count FROM doctor"),
        ("totalPharmacies", "SELECT COUNT(*) AS count FROM pharmacy"),
        ("totalRevenue", "SELECT SUM(total_amt) AS total FROM bill"),
    ];
    for (key, sql) in scalars {
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
        out.insert(
            key.to_string(),
            Value::Array(rows.iter().map(row_to_json).collect()),
        );
    }

    let sql = r#"
        SELECT b.bill_id, b.date, b.total_amt,
               CONCAT(p.first_name, ' ', p.last_name) AS patient_name,
               ph.name AS pharmacy_name
        FROM bill b
        JOIN patient p ON b.PID = p.PID
        JOIN pharmacy ph ON b.phar_id = ph.phar_id
        ORDER BY b.date DESC
        LIMIT 5
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    out.insert(
        "recentBills".to_string(),
        Value::Array(rows.iter().map(row_to_json).collect()),
    );

    Ok(Json(Value::Object(out)))
}
