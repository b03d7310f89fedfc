//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{ColumnInfo, Database, QueryRows};
use async_trait::async_trait;
use duckdb::types::{TimeUnit, Value};
use duckdb::Connection;
use pf_core::sql_utils::{escape_sql_string, split_qualified_name};
use pf_core::MetricValue;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
///
/// Unqualified table names resolve against `default_schema` (`main` unless
/// set with [`DuckDbBackend::with_default_schema`]).
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    default_schema: String,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            default_schema: "main".to_string(),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            default_schema: "main".to_string(),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Resolve unqualified table names against `schema`
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    /// Schema unqualified table names resolve against
    pub fn default_schema(&self) -> &str {
        &self.default_schema
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Run a query and decode every row.
    ///
    /// DuckDB panics on `stmt.column_count()` before execution, so rows are
    /// collected through `query_map` first and column metadata read after.
    fn query_rows_sync(&self, sql: &str) -> DbResult<QueryRows> {
        log::debug!("duckdb query: {}", sql);
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;

        let rows = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                (0..col_count)
                    .map(|i| row.get::<_, Value>(i).map(decode_value))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let columns = (0..stmt.column_count())
            .map(|i| stmt.column_name(i).map_or("?".to_string(), |v| v.to_string()))
            .collect();

        Ok(QueryRows { columns, rows })
    }

    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = split_qualified_name(name, &self.default_schema);
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            escape_sql_string(schema),
            escape_sql_string(table)
        );

        let conn = self.lock()?;
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn table_columns_sync(&self, name: &str) -> DbResult<Vec<ColumnInfo>> {
        let (schema, table) = split_qualified_name(name, &self.default_schema);
        let sql = format!(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_schema = '{}' AND table_name = '{}' \
             ORDER BY ordinal_position",
            escape_sql_string(schema),
            escape_sql_string(table)
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                Ok(ColumnInfo::new(name, data_type))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn list_tables_sync(&self, schema: &str) -> DbResult<Vec<String>> {
        let sql = format!(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = '{}' ORDER BY table_name",
            escape_sql_string(schema)
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tables)
    }
}

/// Decode a DuckDB value into the engine-neutral representation.
///
/// Decimals become floats; dates and timestamps become ISO text so that
/// min/max of temporal columns survive JSON round trips.
fn decode_value(value: Value) -> MetricValue {
    match value {
        Value::Null => MetricValue::Null,
        Value::Boolean(b) => MetricValue::Bool(b),
        Value::TinyInt(i) => MetricValue::Int(i.into()),
        Value::SmallInt(i) => MetricValue::Int(i.into()),
        Value::Int(i) => MetricValue::Int(i.into()),
        Value::BigInt(i) => MetricValue::Int(i),
        Value::HugeInt(i) => i64::try_from(i)
            .map(MetricValue::Int)
            .unwrap_or(MetricValue::Float(i as f64)),
        Value::UTinyInt(i) => MetricValue::Int(i.into()),
        Value::USmallInt(i) => MetricValue::Int(i.into()),
        Value::UInt(i) => MetricValue::Int(i.into()),
        Value::UBigInt(i) => i64::try_from(i)
            .map(MetricValue::Int)
            .unwrap_or(MetricValue::Float(i as f64)),
        Value::Float(f) => MetricValue::Float(f.into()),
        Value::Double(f) => MetricValue::Float(f),
        Value::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(MetricValue::Float)
            .unwrap_or_else(|_| MetricValue::Text(d.to_string())),
        Value::Text(s) | Value::Enum(s) => MetricValue::Text(s),
        Value::Date32(days) => chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map(|dt| MetricValue::Text(dt.date_naive().to_string()))
            .unwrap_or(MetricValue::Int(days.into())),
        Value::Timestamp(unit, raw) => {
            let micros = match unit {
                TimeUnit::Second => raw.saturating_mul(1_000_000),
                TimeUnit::Millisecond => raw.saturating_mul(1_000),
                TimeUnit::Microsecond => raw,
                TimeUnit::Nanosecond => raw / 1_000,
            };
            chrono::DateTime::from_timestamp_micros(micros)
                .map(|dt| MetricValue::Text(dt.naive_utc().to_string()))
                .unwrap_or(MetricValue::Int(raw))
        }
        other => MetricValue::Text(format!("{:?}", other)),
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_rows(&self, sql: &str) -> DbResult<QueryRows> {
        self.query_rows_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn table_columns(&self, name: &str) -> DbResult<Vec<ColumnInfo>> {
        self.table_columns_sync(name)
    }

    async fn list_tables(&self, schema: &str) -> DbResult<Vec<String>> {
        self.list_tables_sync(schema)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
