//! Employee endpoints: listing with contacts and work assignments, creation.

use crate::db::row_to_json;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub salary: f64,
}

/// GET /api/employees — contacts and pharmacy shift assignments aggregated.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sql = r#"
        SELECT e.*,
               GROUP_CONCAT(DISTINCT ec.contact_no SEPARATOR ', ') AS contacts,
               GROUP_CONCAT(DISTINCT CONCAT(w.phar_id, ' (', w.shift_start, '-', w.shift_end, ')') SEPARATOR '; ') AS work_info
        FROM employee e
        LEFT JOIN employee_contact ec ON e.employee_id = ec.employee_id
        LEFT JOIN work w ON e.employee_id = w.employee_id
        GROUP BY e.employee_id
    "#;
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(sql).fetch_all(&state.pool).await?;
    Ok(Json(Value::Array(rows.iter().map(row_to_json).collect())))
}

/// POST /api/employees — direct insert.
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<NewEmployee>,
) -> Result<Json<Value>, AppError> {
    let sql =
        "INSERT INTO employee (employee_id, first_name, last_name, sex, salary) VALUES (?, ?, ?, ?, ?)";
    tracing::debug!(sql = %sql, employee_id = %body.employee_id, "query");
    sqlx::query(sql)
        .bind(&body.employee_id)
        .bind(&body.first_name)
        .bind(&body.last_name)
        .bind(&body.sex)
        .bind(body.salary)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Employee added successfully", "employee_id": body.employee_id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_employee_requires_salary() {
        let r: Result<NewEmployee, _> = serde_json::from_value(json!({
            "employee_id": "E1", "first_name": "Ira", "last_name": "Shah", "sex": "F"
        }));
        assert!(r.is_err());

        let e: NewEmployee = serde_json::from_value(json!({
            "employee_id": "E1", "first_name": "Ira", "last_name": "Shah", "sex": "F",
            "salary": 52000.0
        }))
        .unwrap();
        assert_eq!(e.salary, 52000.0);
    }
}
