//! Doctor endpoints: listing with aggregated specialities, creation, counts.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewDoctor {
    pub doc_id: String,
    pub d_name: String,
    #[serde(default)]
    pub specialities: Vec<String>,
}

/// GET /api/doctors — all doctors, specialities aggregated per row.
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT d.*, GROUP_CONCAT(ds.speciality SEPARATOR ', ') AS specialities
        FROM doctor d
        LEFT JOIN doctor_speciality ds ON d.doc_id = ds.doc_id
        GROUP BY d.doc_id
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// POST /api/doctors — doctor row plus one row per speciality, in a single
/// transaction so a doctor is never left without its submitted specialities.
pub async fn create_doctor(
    State(state): State<AppState>,
    Json(body): Json<NewDoctor>,
) -> Result<Json<Value>, AppError> {
    let mut tx = state.pool.begin().await?;

    let sql = "INSERT INTO doctor (doc_id, d_name) VALUES (?, ?)";
    tracing::debug!(sql = %sql, doc_id = %body.doc_id, "query (tx)");
    sqlx::query(sql)
        .bind(&body.doc_id)
        .bind(&body.d_name)
        .execute(&mut *tx)
        .await?;

    let sql = "INSERT INTO doctor_speciality (doc_id, speciality) VALUES (?, ?)";
    for speciality in &body.specialities {
        tracing::debug!(sql = %sql, doc_id = %body.doc_id, speciality = %speciality, "query (tx)");
        sqlx::query(sql)
            .bind(&body.doc_id)
            .bind(speciality)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Doctor added successfully", "doc_id": body.doc_id })))
}

/// GET /api/doctors/:doc_id/prescription-count — fn_DoctorPrescriptionCount.
pub async fn prescription_count(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = "SELECT fn_DoctorPrescriptionCount(?) AS prescription_count";
    tracing::debug!(sql = %sql, doc_id = %doc_id, "query");
    let row = sqlx::query(sql).bind(&doc_id).fetch_one(&state.pool).await?;
    Ok(Json(row_to_json(&row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_doctor_specialities_default_to_empty() {
        let d: NewDoctor =
            serde_json::from_value(json!({ "doc_id": "D1", "d_name": "Dr. Mehta" })).unwrap();
        assert!(d.specialities.is_empty());
    }

    #[test]
    fn new_doctor_accepts_speciality_list() {
        let d: NewDoctor = serde_json::from_value(json!({
            "doc_id": "D1",
            "d_name": "Dr. Mehta",
            "specialities": ["Cardiology", "Neurology"]
        }))
        .unwrap();
        assert_eq!(d.specialities, vec!["Cardiology", "Neurology"]);
    }
}
