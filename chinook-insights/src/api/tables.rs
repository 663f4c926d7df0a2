//! Store table catalog endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::ApiError;
use crate::db::{self, TableInfo};
use crate::AppState;

/// Table catalog response
#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub table_count: usize,
    pub tables: Vec<TableInfo>,
}

/// GET /api/tables
///
/// Lists every user table in the store with its row count.
pub async fn list_store_tables(
    State(state): State<AppState>,
) -> Result<Json<TablesResponse>, ApiError> {
    let tables = db::list_tables(&state.db).await?;

    Ok(Json(TablesResponse {
        table_count: tables.len(),
        tables,
    }))
}
