//! # Chinook Insights Common Library
//!
//! Shared code for the Chinook Insights workspace including:
//! - Error types
//! - Configuration loading
//! - Read-only store connection handling
//! - Purchase classification domain model

pub mod config;
pub mod db;
pub mod error;
pub mod purchases;

pub use error::{Error, Result};
