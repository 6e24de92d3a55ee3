//! Sales reporting.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

/// GET /api/reports/monthly-sales/:month/:year — sp_MonthlySalesReport result set.
pub async fn monthly_sales(
    State(state): State<AppState>,
    Path((month, year)): Path<(i32, i32)>,
) -> Result<Json<Value>, AppError> {
    let sql = "CALL sp_MonthlySalesReport(?, ?)";
    tracing::debug!(sql = %sql, month, year, "query");
    let rows = sqlx::query(sql)
        .bind(month)
        .bind(year)
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}
