//! Prescription creation.

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewPrescription {
    #[serde(rename = "PID")]
    pub pid: String,
    pub doc_id: String,
    pub drug_name: String,
    pub date: String,
    pub quantity: i32,
}

/// POST /api/prescriptions — direct insert into the prescribe relation.
pub async fn create_prescription(
    State(state): State<AppState>,
    Json(body): Json<NewPrescription>,
) -> Result<Json<Value>, AppError> {
    let sql =
        "INSERT INTO prescribe (PID, doc_id, drug_name, date, quantity) VALUES (?, ?, ?, ?, ?)";
    tracing::debug!(sql = %sql, pid = %body.pid, drug_name = %body.drug_name, "query");
    sqlx::query(sql)
        .bind(&body.pid)
        .bind(&body.doc_id)
        .bind(&body.drug_name)
        .bind(&body.date)
        .bind(body.quantity)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Prescription added successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prescription_quantity_must_be_integer() {
        let p: NewPrescription = serde_json::from_value(json!({
            "PID": "P1", "doc_id": "D1", "drug_name": "Aspirin",
            "date": "2024-12-06", "quantity": 3
        }))
        .unwrap();
        assert_eq!(p.quantity, 3);

        let r: Result<NewPrescription, _> = serde_json::from_value(json!({
            "PID": "P1", "doc_id": "D1", "drug_name": "Aspirin",
            "date": "2024-12-06", "quantity": 2.5
        }));
        assert!(r.is_err());
    }
}
