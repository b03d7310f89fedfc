//! pf-metrics - Metric registry, query runner and profile builder
//!
//! A [`Metric`] is a named, immutable definition of something measurable on
//! a table or column. Binding parameters yields a [`BoundMetric`] that can be
//! turned into an expression and executed through a [`QueryRunner`].

pub mod error;
pub mod metric;
pub mod profiler;
pub mod registry;
pub mod runner;

pub use error::{MetricError, MetricResult, RunnerError, RunnerResult};
pub use metric::{BoundMetric, Metric, MetricKind, MetricParam, MetricParams, MetricScope};
pub use pf_sql::{NamedExpression, ProfileSample};
pub use profiler::ProfileBuilder;
pub use registry::{MetricRegistry, Metrics};
pub use runner::{DbQueryRunner, MetricRow, QueryRunner, SampleMode};
