//! Patient endpoints: listing with aggregated contacts, CRUD, and per-patient reports.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewPatient {
    #[serde(rename = "PID")]
    pub pid: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub insurance_info: String,
}

#[derive(Deserialize)]
pub struct PatientUpdate {
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub insurance_info: String,
}

/// GET /api/patients — all patients, contact numbers aggregated per row.
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT p.*, GROUP_CONCAT(pc.contact_no SEPARATOR ', ') AS contacts
        FROM patient p
        LEFT JOIN patient_contact pc ON p.PID = pc.PID
        GROUP BY p.PID
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// GET /api/patients/:pid — one patient, or `{}` when the id is unknown.
pub async fn get_patient(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT p.*, GROUP_CONCAT(pc.contact_no SEPARATOR ', ') AS contacts
        FROM patient p
        LEFT JOIN patient_contact pc ON p.PID = pc.PID
        WHERE p.PID = ?
        GROUP BY p.PID
    "#;
    tracing::debug!(sql = %sql, pid = %pid, "query");
    let row = sqlx::query(sql).bind(&pid).fetch_optional(&state.pool).await?;
    Ok(Json(row.map(|r| row_to_json(&r)).unwrap_or_else(|| json!({}))))
}

/// POST /api/patients — insert through the sp_AddPatient procedure.
pub async fn create_patient(
    State(state): State<AppState>,
    Json(body): Json<NewPatient>,
) -> Result<Json<Value>, AppError> {
    let sql = "CALL sp_AddPatient(?, ?, ?, ?, ?, ?, ?)";
    tracing::debug!(sql = %sql, pid = %body.pid, "query");
    sqlx::query(sql)
        .bind(&body.pid)
        .bind(&body.first_name)
        .bind(&body.last_name)
        .bind(&body.sex)
        .bind(&body.address)
        .bind(&body.contact)
        .bind(&body.insurance_info)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Patient added successfully", "PID": body.pid })))
}

/// PUT /api/patients/:pid — full-row update; omitted optional fields blank out.
pub async fn update_patient(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    Json(body): Json<PatientUpdate>,
) -> Result<Json<Value>, AppError> {
    let sql = r#"
        UPDATE patient
        SET first_name = ?, last_name = ?, sex = ?, address = ?, insurance_info = ?
        WHERE PID = ?
    "#;
    tracing::debug!(sql = %sql, pid = %pid, "query");
    sqlx::query(sql)
        .bind(&body.first_name)
        .bind(&body.last_name)
        .bind(&body.sex)
        .bind(&body.address)
        .bind(&body.insurance_info)
        .bind(&pid)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Patient updated successfully" })))
}

/// DELETE /api/patients/:pid — related rows cascade in the schema.
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = "DELETE FROM patient WHERE PID = ?";
    tracing::debug!(sql = %sql, pid = %pid, "query");
    sqlx::query(sql).bind(&pid).execute(&state.pool).await?;
    Ok(Json(json!({ "message": "Patient deleted successfully" })))
}

/// GET /api/patients/:pid/prescriptions — result set of sp_GetPatientPrescriptions.
pub async fn patient_prescriptions(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = "CALL sp_GetPatientPrescriptions(?)";
    tracing::debug!(sql = %sql, pid = %pid, "query");
    let rows = sqlx::query(sql).bind(&pid).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// GET /api/patients/:pid/spending — fn_PatientTotalSpending wrapped in a row.
pub async fn patient_spending(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = "SELECT fn_PatientTotalSpending(?) AS total_spending";
    tracing::debug!(sql = %sql, pid = %pid, "query");
    let row = sqlx::query(sql).bind(&pid).fetch_one(&state.pool).await?;
    Ok(Json(row_to_json(&row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_patient_optional_fields_default_to_empty() {
        let p: NewPatient = serde_json::from_value(json!({
            "PID": "P1", "first_name": "Asha", "last_name": "Rao", "sex": "F"
        }))
        .unwrap();
        assert_eq!(p.pid, "P1");
        assert_eq!(p.address, "");
        assert_eq!(p.contact, "");
        assert_eq!(p.insurance_info, "");
    }

    #[test]
    fn new_patient_rejects_missing_pid() {
        let r: Result<NewPatient, _> = serde_json::from_value(json!({
            "first_name": "Asha", "last_name": "Rao", "sex": "F"
        }));
        assert!(r.is_err());
    }

    #[test]
    fn patient_update_requires_name_and_sex() {
        let r: Result<PatientUpdate, _> =
            serde_json::from_value(json!({ "first_name": "Asha" }));
        assert!(r.is_err());

        let ok: PatientUpdate = serde_json::from_value(json!({
            "first_name": "Asha", "last_name": "Rao", "sex": "F"
        }))
        .unwrap();
        assert_eq!(ok.insurance_info, "");
    }
}
