//! Pharmacy endpoints.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewPharmacy {
    pub phar_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub fax: String,
}

/// GET /api/pharmacies — all pharmacies.
pub async fn list_pharmacies(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = "SELECT * FROM pharmacy";
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// POST /api/pharmacies — direct insert.
pub async fn create_pharmacy(
    State(state): State<AppState>,
    Json(body): Json<NewPharmacy>,
) -> Result<Json<Value>, AppError> {
    let sql = "INSERT INTO pharmacy (phar_id, name, address, fax) VALUES (?, ?, ?, ?)";
    tracing::debug!(sql = %sql, phar_id = %body.phar_id, "query");
    sqlx::query(sql)
        .bind(&body.phar_id)
        .bind(&body.name)
        .bind(&body.address)
        .bind(&body.fax)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Pharmacy added successfully", "phar_id": body.phar_id })))
}

/// GET /api/pharmacies/:phar_id/drug-count — fn_PharmacyDrugCount.
pub async fn drug_count(
    State(state): State<AppState>,
    Path(phar_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let sql = "SELECT fn_PharmacyDrugCount(?) AS drug_count";
    tracing::debug!(sql = %sql, phar_id = %phar_id, "query");
    let row = sqlx::query(sql).bind(&phar_id).fetch_one(&state.pool).await?;
    Ok(Json(row_to_json(&row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pharmacy_address_and_fax_default_to_empty() {
        let p: NewPharmacy =
            serde_json::from_value(json!({ "phar_id": "PH1", "name": "Central" })).unwrap();
        assert_eq!(p.address, "");
        assert_eq!(p.fax, "");
    }
}
