//! Genre sales analysis endpoint
//!
//! Tracks sold per genre for one customer country, in absolute numbers and
//! as a share of every track sold in that country.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::AppState;

/// Query parameters for genre sales
#[derive(Debug, Deserialize)]
pub struct GenreSalesQuery {
    /// Customer country to report on
    #[serde(default = "default_country")]
    pub country: String,

    /// Maximum number of genres to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_country() -> String {
    "USA".to_string()
}

fn default_limit() -> i64 {
    10
}

/// One genre's sales within the requested country
#[derive(Debug, Serialize)]
pub struct GenreSalesRow {
    pub genre: String,
    pub tracks_sold: i64,
    /// Fraction of all tracks sold in the country
    pub share: f64,
}

/// Genre sales response
#[derive(Debug, Serialize)]
pub struct GenreSalesResponse {
    pub analysis: String,
    pub description: String,
    pub country: String,
    pub total_tracks_sold: i64,
    pub genres: Vec<GenreSalesRow>,
}

/// GET /api/analysis/genre-sales?country=USA&limit=10
///
/// Top-selling genres for one customer country, sorted by tracks sold.
pub async fn genre_sales(
    State(state): State<AppState>,
    Query(query): Query<GenreSalesQuery>,
) -> Result<Json<GenreSalesResponse>, ApiError> {
    if query.limit < 1 {
        return Err(ApiError::BadRequest(format!(
            "Invalid limit {}: must be at least 1",
            query.limit
        )));
    }

    // Every track sold in the country, the denominator for shares
    let total_tracks_sold: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)
         FROM invoice_line il
         JOIN invoice i ON i.invoice_id = il.invoice_id
         JOIN customer c ON c.customer_id = i.customer_id
         WHERE c.country = ?",
    )
    .bind(&query.country)
    .fetch_one(&state.db)
    .await?;

    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(g.name, '(no genre)') AS genre,
                COUNT(il.invoice_line_id) AS tracks_sold
         FROM invoice_line il
         JOIN invoice i ON i.invoice_id = il.invoice_id
         JOIN customer c ON c.customer_id = i.customer_id
         JOIN track t ON t.track_id = il.track_id
         LEFT JOIN genre g ON g.genre_id = t.genre_id
         WHERE c.country = ?
         GROUP BY genre
         ORDER BY tracks_sold DESC, genre ASC
         LIMIT ?",
    )
    .bind(&query.country)
    .bind(query.limit)
    .fetch_all(&state.db)
    .await?;

    let genres = rows
        .into_iter()
        .map(|(genre, tracks_sold)| GenreSalesRow {
            genre,
            tracks_sold,
            share: if total_tracks_sold == 0 {
                0.0
            } else {
                tracks_sold as f64 / total_tracks_sold as f64
            },
        })
        .collect();

    Ok(Json(GenreSalesResponse {
        analysis: "genre-sales".to_string(),
        description: "Tracks sold per genre within one customer country".to_string(),
        country: query.country,
        total_tracks_sold,
        genres,
    }))
}
