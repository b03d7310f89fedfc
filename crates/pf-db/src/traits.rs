//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use pf_core::{ColumnName, MetricValue};

/// Result set of a query, decoded into engine-neutral values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    /// Column names in select order
    pub columns: Vec<String>,
    /// Rows, each with one value per column
    pub rows: Vec<Vec<MetricValue>>,
}

impl QueryRows {
    /// True when the query returned no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as `(column, value)` pairs
    pub fn named_rows(&self) -> impl Iterator<Item = Vec<(&str, &MetricValue)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}

/// A column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: ColumnName,
    /// Engine type name (e.g. `INTEGER`, `VARCHAR`, `DECIMAL(18,3)`)
    pub data_type: String,
}

impl ColumnInfo {
    /// Create column metadata
    pub fn new(name: impl Into<ColumnName>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    fn base_type(&self) -> String {
        let upper = self.data_type.trim().to_ascii_uppercase();
        match upper.find('(') {
            Some(pos) => upper[..pos].trim_end().to_string(),
            None => upper,
        }
    }

    /// True for integer, floating point and fixed point types
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.base_type().as_str(),
            "TINYINT"
                | "SMALLINT"
                | "INTEGER"
                | "INT"
                | "BIGINT"
                | "HUGEINT"
                | "UTINYINT"
                | "USMALLINT"
                | "UINTEGER"
                | "UBIGINT"
                | "UHUGEINT"
                | "FLOAT"
                | "REAL"
                | "DOUBLE"
                | "DOUBLE PRECISION"
                | "DECIMAL"
                | "NUMERIC"
        )
    }

    /// True for character types
    pub fn is_text(&self) -> bool {
        matches!(
            self.base_type().as_str(),
            "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "BPCHAR" | "CHARACTER" | "CHARACTER VARYING"
        )
    }

    /// True for date, time and timestamp types
    pub fn is_temporal(&self) -> bool {
        let base = self.base_type();
        base == "DATE" || base.starts_with("TIMESTAMP") || base.starts_with("TIME")
    }
}

/// Database abstraction the metric runner executes against
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row
    async fn query_rows(&self, sql: &str) -> DbResult<QueryRows>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Columns of a table or view in ordinal order; empty when it does not exist
    async fn table_columns(&self, name: &str) -> DbResult<Vec<ColumnInfo>>;

    /// Tables and views in `schema`, sorted by name
    async fn list_tables(&self, schema: &str) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
