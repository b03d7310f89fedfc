//! Error types for pf-metrics

use pf_db::DbError;
use pf_sql::SqlError;
use thiserror::Error;

/// Registry and binding errors
///
/// These are configuration mistakes and surface immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// M001: Name does not match any registered metric
    #[error("[M001] Unknown metric: {name}")]
    UnknownMetric { name: String },

    /// M002: A parametrized metric was used before its parameter was bound
    #[error("[M002] Metric {metric} requires parameter '{param}'")]
    MissingMetricParameter { metric: String, param: String },

    /// M003: Parameter not declared by the metric
    #[error("[M003] Metric {metric} does not take parameter '{param}'")]
    UnexpectedMetricParameter { metric: String, param: String },

    /// M004: Metric has no single expression (composed, grouped or schema metric)
    #[error("[M004] Metric {metric} is a {kind} metric and cannot be computed as an expression")]
    NotAnExpression { metric: String, kind: String },

    /// M005: Column-scoped metric used without a column
    #[error("[M005] Metric {metric} needs a column")]
    ColumnRequired { metric: String },
}

/// Result type alias for MetricError
pub type MetricResult<T> = Result<T, MetricError>;

/// Errors raised while computing metrics against a table
#[derive(Error, Debug)]
pub enum RunnerError {
    /// R001: Column is not part of the table
    #[error("[R001] Column '{column}' not found in table {table}")]
    ColumnNotFound { table: String, column: String },

    /// R002: The backend failed to run the query
    #[error("[R002] Query against {table} failed: {source}")]
    QueryExecution {
        table: String,
        #[source]
        source: DbError,
    },

    /// R003: Expression could not be rendered for the dialect
    #[error("[R003] Invalid expression for {table}: {source}")]
    InvalidExpression {
        table: String,
        #[source]
        source: SqlError,
    },

    /// R004: Registry or binding error
    #[error("[R004] {0}")]
    Metric(#[from] MetricError),
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
