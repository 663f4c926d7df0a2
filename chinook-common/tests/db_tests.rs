//! Tests for read-only store connection handling and schema verification

use chinook_common::db::{self, REQUIRED_TABLES};
use chinook_common::Error;
use std::path::Path;

/// Create a store file containing the given tables, then close it
async fn create_store(path: &Path, tables: &[&str]) {
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let pool = sqlx::SqlitePool::connect(&url)
        .await
        .expect("Should create store file");

    for table in tables {
        sqlx::query(&format!("CREATE TABLE {} (id INTEGER PRIMARY KEY)", table))
            .execute(&pool)
            .await
            .expect("Should create table");
    }

    pool.close().await;
}

#[tokio::test]
async fn test_connect_readonly_missing_file() {
    let err = db::connect_readonly(Path::new("/tmp/chinook-no-such-store.db"))
        .await
        .expect_err("Missing file should be rejected");

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_connect_readonly_rejects_writes() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("store.db");
    create_store(&path, REQUIRED_TABLES).await;

    let pool = db::connect_readonly(&path)
        .await
        .expect("Should connect in read-only mode");

    let result = sqlx::query("INSERT INTO invoice (id) VALUES (1)")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "Write should fail on read-only connection");
}

#[tokio::test]
async fn test_verify_schema_accepts_complete_store() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("store.db");
    create_store(&path, REQUIRED_TABLES).await;

    let pool = db::connect_readonly(&path)
        .await
        .expect("Should connect in read-only mode");

    db::verify_schema(&pool)
        .await
        .expect("Complete schema should verify");
}

#[tokio::test]
async fn test_verify_schema_rejects_missing_table() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("store.db");

    // Everything except invoice_line
    let partial: Vec<&str> = REQUIRED_TABLES
        .iter()
        .copied()
        .filter(|t| *t != "invoice_line")
        .collect();
    create_store(&path, &partial).await;

    let pool = db::connect_readonly(&path)
        .await
        .expect("Should connect in read-only mode");

    let err = db::verify_schema(&pool)
        .await
        .expect_err("Partial schema should be rejected");

    match err {
        Error::Config(msg) => assert!(msg.contains("invoice_line")),
        other => panic!("Expected Config error, got: {}", other),
    }
}
