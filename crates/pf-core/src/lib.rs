//! pf-core - Core records for the profiler
//!
//! This crate holds the plain data the engine consumes and produces:
//! column/table profiles, test case definitions, verdicts, the project
//! configuration and SQL quoting helpers shared by the other crates.

pub mod column_name;
pub mod config;
pub mod error;
mod newtype_string;
pub mod profile;
pub mod result;
pub mod sql_utils;
pub mod table_name;
pub mod test_case;
pub mod value;

pub use column_name::ColumnName;
pub use config::{Config, DatabaseConfig, DbType, Dialect, SampleConfig};
pub use error::{CoreError, CoreResult};
pub use profile::{ColumnProfile, ProfileSet, TableProfile};
pub use result::{TestCaseResult, TestCaseStatus};
pub use table_name::TableName;
pub use test_case::{
    ColumnCountParams, ColumnNamesParams, InSetParams, LengthRangeParams, MissingCountParams,
    NotInSetParams, RawTestCase, RegexParams, RowCountParams, RowCountRangeParams, TestCase,
    TestCaseKind, TestDefinition, TestSuite, TestTarget, ValueRangeParams,
};
pub use value::MetricValue;
