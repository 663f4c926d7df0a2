//! Read-only store access
//!
//! The store is an external snapshot this workspace never owns or writes.
//! All connections use SQLite read-only mode, and startup verifies that the
//! expected Chinook tables are present before any analysis runs.

use crate::{Error, Result};
use sqlx::SqlitePool;
use std::path::Path;

/// Tables a Chinook-style store must provide before analyses can run
pub const REQUIRED_TABLES: &[&str] = &[
    "album",
    "artist",
    "customer",
    "employee",
    "genre",
    "invoice",
    "invoice_line",
    "track",
];

/// Connect to the store database in read-only mode
///
/// Safety: mode=ro prevents write operations; immutable=1 keeps SQLite from
/// touching the file even for internal bookkeeping.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "database not found: {}",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro&immutable=1", db_path.display());

    let pool = SqlitePool::connect(&db_url).await?;

    // Verify read-only by attempting a write (should fail)
    #[cfg(debug_assertions)]
    {
        let write_test = sqlx::query("CREATE TABLE _test_write (id INTEGER)")
            .execute(&pool)
            .await;
        if write_test.is_ok() {
            panic!("SAFETY VIOLATION: store connection is not read-only!");
        }
    }

    Ok(pool)
}

/// Verify that every table in [`REQUIRED_TABLES`] exists in the store
pub async fn verify_schema(pool: &SqlitePool) -> Result<()> {
    let names: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
        "#,
    )
    .fetch_all(pool)
    .await?;

    for required in REQUIRED_TABLES {
        if !names.iter().any(|(name,)| name == required) {
            return Err(Error::Config(format!(
                "store is missing required table '{}'",
                required
            )));
        }
    }

    Ok(())
}
