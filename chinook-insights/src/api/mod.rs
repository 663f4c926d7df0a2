//! HTTP API handlers for chinook-insights

pub mod albums;
pub mod buildinfo;
pub mod countries;
pub mod employees;
pub mod error;
pub mod genres;
pub mod health;
pub mod tables;

pub use albums::{album_purchase_invoices, album_purchase_summary};
pub use buildinfo::get_build_info;
pub use countries::country_sales;
pub use employees::employee_sales;
pub use error::ApiError;
pub use genres::genre_sales;
pub use health::health_routes;
pub use tables::list_store_tables;
