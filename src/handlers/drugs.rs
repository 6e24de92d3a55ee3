//! Drug endpoints: catalog listing, creation, price queries and updates.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewDrug {
    pub drug_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_id: String,
}

#[derive(Deserialize)]
pub struct PriceUpdate {
    pub phar_id: String,
    pub drug_name: String,
    pub new_price: f64,
}

/// GET /api/drugs — catalog with manufacturer names joined in.
pub async fn list_drugs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT d.*, dm.name AS manufacturer_name
        FROM drug d
        LEFT JOIN drug_manufacturer dm ON d.company_id = dm.company_id
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// POST /api/drugs — direct insert.
pub async fn create_drug(
    State(state): State<AppState>,
    Json(body): Json<NewDrug>,
) -> Result<Json<Value>, AppError> {
    let sql = "INSERT INTO drug (drug_name, description, company_id) VALUES (?, ?, ?)";
    tracing::debug!(sql = %sql, drug_name = %body.drug_name, "query");
    sqlx::query(sql)
        .bind(&body.drug_name)
        .bind(&body.description)
        .bind(&body.company_id)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Drug added successfully", "drug_name": body.drug_name })))
}

/// GET /api/drugs/below-price/:threshold — sp_GetBelowPriceDrugs result set.
pub async fn below_price(
    State(state): State<AppState>,
    Path(threshold): Path<f64>,
) -> Result<Json<Value>, AppError> {
    let sql = "CALL sp_GetBelowPriceDrugs(?)";
    tracing::debug!(sql = %sql, threshold = %threshold, "query");
    let rows = sqlx::query(sql).bind(threshold).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// PUT /api/drugs/update-price — sp_UpdateDrugPrice; echoes the procedure's
/// message row, `{}` when it produced none.
pub async fn update_price(
    State(state): State<AppState>,
    Json(body): Json<PriceUpdate>,
) -> Result<Json<Value>, AppError> {
    let sql = "CALL sp_UpdateDrugPrice(?, ?, ?)";
    tracing::debug!(sql = %sql, phar_id = %body.phar_id, drug_name = %body.drug_name, "query");
    let row = sqlx::query(sql)
        .bind(&body.phar_id)
        .bind(&body.drug_name)
        .bind(body.new_price)
        .fetch_optional(&state.pool)
        .await?;
    Ok(Json(row.map(|r| row_to_json(&r)).unwrap_or_else(|| json!({}))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drug_requires_only_name() {
        let d: NewDrug = serde_json::from_value(json!({ "drug_name": "Aspirin" })).unwrap();
        assert_eq!(d.description, "");
        assert_eq!(d.company_id, "");
    }

    #[test]
    fn price_update_parses_numeric_price() {
        let u: PriceUpdate = serde_json::from_value(json!({
            "phar_id": "PH1", "drug_name": "Aspirin", "new_price": 12.5
        }))
        .unwrap();
        assert_eq!(u.new_price, 12.5);

        let r: Result<PriceUpdate, _> = serde_json::from_value(json!({
            "phar_id": "PH1", "drug_name": "Aspirin"
        }));
        assert!(r.is_err());
    }
}
