//! Store queries for chinook-insights
//!
//! Loads the read-only projections the analyses consume. Referential
//! violations (an invoice line pointing at a track the catalog does not
//! know) are rejected here, at load time, so the classifier itself never
//! sees malformed data.

use chinook_common::purchases::PurchaseSnapshot;
use chinook_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;

/// Load the purchase projections needed by the album-purchase classifier:
/// the full track-to-album mapping, then every invoice line.
pub async fn load_purchase_snapshot(pool: &SqlitePool) -> Result<PurchaseSnapshot> {
    let mut snapshot = PurchaseSnapshot::new();

    let tracks: Vec<(i64, Option<i64>)> =
        sqlx::query_as("SELECT track_id, album_id FROM track")
            .fetch_all(pool)
            .await?;
    for (track_id, album_id) in tracks {
        snapshot.insert_track(track_id, album_id);
    }

    let lines: Vec<(Option<i64>, Option<i64>)> =
        sqlx::query_as("SELECT invoice_id, track_id FROM invoice_line")
            .fetch_all(pool)
            .await?;
    for (invoice_id, track_id) in lines {
        let (invoice_id, track_id) = match (invoice_id, track_id) {
            (Some(invoice_id), Some(track_id)) => (invoice_id, track_id),
            _ => {
                return Err(Error::ReferentialIntegrity(
                    "invoice line with null invoice or track id".to_string(),
                ))
            }
        };
        snapshot.insert_line(invoice_id, track_id)?;
    }

    Ok(snapshot)
}

/// Table metadata for the catalog endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// Number of rows in table
    pub row_count: i64,
}

/// List all user tables with row counts
///
/// Returns tables in alphabetical order, excluding SQLite internal tables.
pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<TableInfo>> {
    let tables: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut table_infos = Vec::new();

    for (table_name,) in tables {
        // Table names come from sqlite_master, not from user input
        let row_count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table_name))
            .fetch_one(pool)
            .await?;

        table_infos.push(TableInfo {
            name: table_name,
            row_count,
        });
    }

    Ok(table_infos)
}
