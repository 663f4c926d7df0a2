//! Employee sales performance endpoint
//!
//! Total invoice dollars attributed to each sales support agent through
//! the customers they are assigned to.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::ApiError;
use crate::AppState;

/// One agent's sales performance
#[derive(Debug, Serialize)]
pub struct EmployeeSalesRow {
    pub employee: String,
    pub title: Option<String>,
    pub hire_date: Option<String>,
    /// Customers assigned to this agent
    pub customers: i64,
    pub total_sales: f64,
}

/// Employee sales response
#[derive(Debug, Serialize)]
pub struct EmployeeSalesResponse {
    pub analysis: String,
    pub description: String,
    pub employees: Vec<EmployeeSalesRow>,
}

/// GET /api/analysis/employee-sales
///
/// Sales totals per support agent, sorted by total descending. Agents with
/// no assigned customers (or customers with no invoices) do not appear;
/// hire date is included since tenure explains most of the spread.
pub async fn employee_sales(
    State(state): State<AppState>,
) -> Result<Json<EmployeeSalesResponse>, ApiError> {
    let rows: Vec<(String, Option<String>, Option<String>, i64, f64)> = sqlx::query_as(
        "SELECT e.first_name || ' ' || e.last_name AS employee,
                e.title,
                e.hire_date,
                COUNT(DISTINCT c.customer_id) AS customers,
                SUM(i.total) AS total_sales
         FROM employee e
         JOIN customer c ON c.support_rep_id = e.employee_id
         JOIN invoice i ON i.customer_id = c.customer_id
         GROUP BY e.employee_id
         ORDER BY total_sales DESC, employee ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let employees = rows
        .into_iter()
        .map(
            |(employee, title, hire_date, customers, total_sales)| EmployeeSalesRow {
                employee,
                title,
                hire_date,
                customers,
                total_sales,
            },
        )
        .collect();

    Ok(Json(EmployeeSalesResponse {
        analysis: "employee-sales".to_string(),
        description: "Invoice dollars per sales support agent".to_string(),
        employees,
    }))
}
