//! pf-db - Database abstraction layer for the profiler
//!
//! This crate provides the `Database` trait the metric runner executes
//! against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{ColumnInfo, Database, QueryRows};
