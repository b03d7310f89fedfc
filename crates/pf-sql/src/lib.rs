//! pf-sql - SQL layer for the profiler
//!
//! Metric definitions produce engine-agnostic [`Expression`]s; an
//! [`SqlDialect`] turns them into executable SELECT statements, including the
//! engine-specific sampling clause.

pub mod dialect;
pub mod error;
pub mod expr;

pub use dialect::{dialect_for, DuckDbDialect, PostgresDialect, SqlDialect, GROUP_KEY};
pub use error::{SqlError, SqlResult};
pub use expr::{AggregateFn, Expression, NamedExpression, Predicate, ProfileSample};
