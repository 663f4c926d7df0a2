//! Album-vs-track purchase analysis endpoints
//!
//! The summary answers the purchasing-strategy question behind the store:
//! what share of invoices are whole-album purchases? The invoice listing
//! exposes the per-invoice verdicts the summary is reduced from.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use chinook_common::purchases::{
    self, AlbumPurchase, InvoiceClassification, PurchaseBreakdown,
};

use crate::api::ApiError;
use crate::db;
use crate::pagination::{page_bounds, PAGE_SIZE};
use crate::AppState;

/// Summary response for GET /api/analysis/album-purchases
#[derive(Debug, Serialize)]
pub struct AlbumPurchaseSummaryResponse {
    pub analysis: String,
    pub description: String,
    pub breakdown: PurchaseBreakdown,
}

/// GET /api/analysis/album-purchases
///
/// Classifies every invoice and returns aggregate counts and shares.
pub async fn album_purchase_summary(
    State(state): State<AppState>,
) -> Result<Json<AlbumPurchaseSummaryResponse>, ApiError> {
    let snapshot = db::load_purchase_snapshot(&state.db).await?;
    let classifications = snapshot.classify();
    let breakdown = purchases::summarize(&classifications);

    Ok(Json(AlbumPurchaseSummaryResponse {
        analysis: "album-purchases".to_string(),
        description: "Invoices buying a complete album vs individual tracks".to_string(),
        breakdown,
    }))
}

/// Query parameters for the per-invoice listing
#[derive(Debug, Deserialize)]
pub struct InvoiceQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Optional verdict filter: "yes" or "no"
    pub purchase: Option<String>,
}

fn default_page() -> i64 {
    1
}

/// Paginated per-invoice response
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub invoices: Vec<InvoiceClassification>,
}

/// GET /api/analysis/album-purchases/invoices
///
/// Returns per-invoice classifications, ordered by invoice id, with an
/// optional verdict filter and 100-row pages.
pub async fn album_purchase_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let filter = match query.purchase.as_deref() {
        None => None,
        Some("yes") => Some(AlbumPurchase::Yes),
        Some("no") => Some(AlbumPurchase::No),
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "Invalid purchase filter '{}': expected 'yes' or 'no'",
                other
            )))
        }
    };

    let snapshot = db::load_purchase_snapshot(&state.db).await?;
    let mut classifications = snapshot.classify();

    if let Some(verdict) = filter {
        classifications.retain(|c| c.album_purchase == verdict);
    }

    let p = page_bounds(classifications.len(), query.page);
    let invoices = classifications[p.start..p.end].to_vec();

    Ok(Json(InvoiceListResponse {
        total_results: classifications.len(),
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        invoices,
    }))
}
