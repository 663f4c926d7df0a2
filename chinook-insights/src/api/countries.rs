//! Country sales analysis endpoint
//!
//! Per-country customer counts and sales metrics. Countries with a single
//! customer carry too little signal on their own, so they are collapsed
//! into an "Other" bucket that always sorts last.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::ApiError;
use crate::AppState;

/// Bucket name for single-customer countries
const OTHER: &str = "Other";

/// One country's (or the Other bucket's) sales metrics
#[derive(Debug, Serialize)]
pub struct CountrySalesRow {
    pub country: String,
    pub customers: i64,
    pub total_sales: f64,
    /// Sales per distinct order
    pub average_order: f64,
    /// Sales per distinct customer
    pub customer_lifetime_value: f64,
}

/// Country sales response
#[derive(Debug, Serialize)]
pub struct CountrySalesResponse {
    pub analysis: String,
    pub description: String,
    pub countries: Vec<CountrySalesRow>,
}

/// Raw per-country aggregate, before bucketing
struct CountryAggregate {
    country: String,
    customers: i64,
    orders: i64,
    total_sales: f64,
}

/// GET /api/analysis/country-sales
///
/// Sales metrics per country, sorted by total sales descending with the
/// "Other" bucket last.
pub async fn country_sales(
    State(state): State<AppState>,
) -> Result<Json<CountrySalesResponse>, ApiError> {
    let rows: Vec<(String, i64, i64, f64)> = sqlx::query_as(
        "SELECT COALESCE(c.country, '(unknown)') AS country,
                COUNT(DISTINCT c.customer_id) AS customers,
                COUNT(DISTINCT i.invoice_id) AS orders,
                SUM(il.unit_price * il.quantity) AS total_sales
         FROM customer c
         JOIN invoice i ON i.customer_id = c.customer_id
         JOIN invoice_line il ON il.invoice_id = i.invoice_id
         GROUP BY country",
    )
    .fetch_all(&state.db)
    .await?;

    let aggregates = rows
        .into_iter()
        .map(|(country, customers, orders, total_sales)| CountryAggregate {
            country,
            customers,
            orders,
            total_sales,
        });

    // Fold single-customer countries into the Other bucket
    let mut named: Vec<CountryAggregate> = Vec::new();
    let mut other = CountryAggregate {
        country: OTHER.to_string(),
        customers: 0,
        orders: 0,
        total_sales: 0.0,
    };

    for aggregate in aggregates {
        if aggregate.customers == 1 {
            other.customers += aggregate.customers;
            other.orders += aggregate.orders;
            other.total_sales += aggregate.total_sales;
        } else {
            named.push(aggregate);
        }
    }

    named.sort_by(|a, b| {
        b.total_sales
            .partial_cmp(&a.total_sales)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });

    if other.customers > 0 {
        named.push(other);
    }

    let countries = named.into_iter().map(into_row).collect();

    Ok(Json(CountrySalesResponse {
        analysis: "country-sales".to_string(),
        description: "Customer counts and sales metrics per country".to_string(),
        countries,
    }))
}

fn into_row(aggregate: CountryAggregate) -> CountrySalesRow {
    // Orders and customers are both nonzero for every aggregate produced by
    // the joins above; guard anyway so a degenerate store reports zeros
    let average_order = if aggregate.orders == 0 {
        0.0
    } else {
        aggregate.total_sales / aggregate.orders as f64
    };
    let customer_lifetime_value = if aggregate.customers == 0 {
        0.0
    } else {
        aggregate.total_sales / aggregate.customers as f64
    };

    CountrySalesRow {
        country: aggregate.country,
        customers: aggregate.customers,
        total_sales: aggregate.total_sales,
        average_order,
        customer_lifetime_value,
    }
}
