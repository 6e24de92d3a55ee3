//! Bill endpoints: listing with joined names, creation.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewBill {
    pub bill_id: String,
    pub date: String,
    pub total_amt: f64,
    pub payment_method: String,
    #[serde(rename = "PID")]
    pub pid: String,
    pub phar_id: String,
}

/// GET /api/bills — all bills with patient and pharmacy names, newest first.
pub async fn list_bills(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT b.*,
               CONCAT(p.first_name, ' ', p.last_name) AS patient_name,
               ph.name AS pharmacy_name
        FROM bill b
        JOIN patient p ON b.PID = p.PID
        JOIN pharmacy ph ON b.phar_id = ph.phar_id
        ORDER BY b.date DESC
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// POST /api/bills — direct insert; the date arrives as `YYYY-MM-DD`.
pub async fn create_bill(
    State(state): State<AppState>,
    Json(body): Json<NewBill>,
) -> Result<Json<Value>, AppError> {
    let sql =
        "INSERT INTO bill (bill_id, date, total_amt, payment_method, PID, phar_id) VALUES (?, ?, ?, ?, ?, ?)";
    tracing::debug!(sql = %sql, bill_id = %body.bill_id, "query");
    sqlx::query(sql)
        .bind(&body.bill_id)
        .bind(&body.date)
        .bind(body.total_amt)
        .bind(&body.payment_method)
        .bind(&body.pid)
        .bind(&body.phar_id)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Bill added successfully", "bill_id": body.bill_id })))
}
