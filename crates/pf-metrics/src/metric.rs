//! Metric definitions and parameter binding

use crate::error::{MetricError, MetricResult};
use crate::registry::Metrics;
use pf_core::{ColumnName, ColumnProfile, MetricValue};
use pf_sql::{AggregateFn, Expression, NamedExpression, Predicate};
use std::fmt;

/// What a metric is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricScope {
    /// Measured on one column
    Column,
    /// Measured on the whole table
    Table,
}

impl fmt::Display for MetricScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricScope::Column => write!(f, "column"),
            MetricScope::Table => write!(f, "table"),
        }
    }
}

/// How a metric is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// A single aggregate expression
    Static,
    /// Derived from other metrics already in the profile
    Composed,
    /// Needs a grouped query over value frequencies
    Grouped,
    /// Answered by schema introspection
    Schema,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Static => write!(f, "static"),
            MetricKind::Composed => write!(f, "composed"),
            MetricKind::Grouped => write!(f, "grouped"),
            MetricKind::Schema => write!(f, "schema"),
        }
    }
}

/// Parameters a metric may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricParam {
    /// List of values to match against
    Values,
    /// LIKE pattern
    Pattern,
    /// Regular expression
    Regex,
}

impl MetricParam {
    /// Parameter name as shown to users
    pub fn name(self) -> &'static str {
        match self {
            MetricParam::Values => "values",
            MetricParam::Pattern => "pattern",
            MetricParam::Regex => "regex",
        }
    }
}

impl fmt::Display for MetricParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameter values supplied when binding a metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricParams {
    values: Option<Vec<MetricValue>>,
    pattern: Option<String>,
    regex: Option<String>,
}

impl MetricParams {
    /// No parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `values` parameter
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<MetricValue>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `pattern` parameter
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the `regex` parameter
    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Bound `values`, if any
    pub fn values(&self) -> Option<&[MetricValue]> {
        self.values.as_deref()
    }

    /// Bound `pattern`, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Bound `regex`, if any
    pub fn regex(&self) -> Option<&str> {
        self.regex.as_deref()
    }

    /// Parameters that carry a value
    pub fn present(&self) -> Vec<MetricParam> {
        let mut present = Vec::new();
        if self.values.is_some() {
            present.push(MetricParam::Values);
        }
        if self.pattern.is_some() {
            present.push(MetricParam::Pattern);
        }
        if self.regex.is_some() {
            present.push(MetricParam::Regex);
        }
        present
    }

    /// True when nothing is set
    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// Union of `self` and `later`; on overlap `later` wins
    fn merged(&self, later: MetricParams) -> MetricParams {
        MetricParams {
            values: later.values.or_else(|| self.values.clone()),
            pattern: later.pattern.or_else(|| self.pattern.clone()),
            regex: later.regex.or_else(|| self.regex.clone()),
        }
    }
}

/// Immutable definition of a measurable quantity
#[derive(Debug, PartialEq, Eq)]
pub struct Metric {
    pub(crate) id: Metrics,
    pub(crate) scope: MetricScope,
    pub(crate) kind: MetricKind,
    pub(crate) params: &'static [MetricParam],
    pub(crate) description: &'static str,
}

impl Metric {
    /// Registry identity
    pub fn id(&self) -> Metrics {
        self.id
    }

    /// Unique camelCase name
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Column or table metric
    pub fn scope(&self) -> MetricScope {
        self.scope
    }

    /// How the metric is computed
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Parameters that must be bound before the metric can run
    pub fn params(&self) -> &'static [MetricParam] {
        self.params
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Bind parameters, producing a new bound metric
    pub fn bind(&'static self, params: MetricParams) -> MetricResult<BoundMetric> {
        BoundMetric::unbound(self).bind(params)
    }

    /// Compute a composed metric from values already in the column profile.
    ///
    /// `None` when the metric is not composed, an input is absent, or a
    /// denominator is zero.
    pub fn compute(&self, profile: &ColumnProfile) -> Option<MetricValue> {
        let ratio = |num: Option<u64>, den: Option<u64>| match (num, den) {
            (Some(n), Some(d)) if d > 0 => Some(MetricValue::Float(n as f64 / d as f64)),
            _ => None,
        };
        match self.id {
            Metrics::NullProportion => {
                let total = profile.values_count.zip(profile.null_count).map(|(v, n)| v + n);
                ratio(profile.null_count, total)
            }
            Metrics::DistinctProportion => ratio(profile.distinct_count, profile.values_count),
            Metrics::UniqueProportion => ratio(profile.unique_count, profile.values_count),
            Metrics::DuplicateCount => profile
                .values_count
                .zip(profile.unique_count)
                .map(|(v, u)| MetricValue::from(v.saturating_sub(u))),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A metric together with its bound parameters
///
/// Binding never mutates: each `bind` returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundMetric {
    metric: &'static Metric,
    params: MetricParams,
}

impl BoundMetric {
    /// A metric with nothing bound yet
    pub fn unbound(metric: &'static Metric) -> Self {
        Self {
            metric,
            params: MetricParams::default(),
        }
    }

    /// Underlying definition
    pub fn metric(&self) -> &'static Metric {
        self.metric
    }

    /// Bound parameters
    pub fn params(&self) -> &MetricParams {
        &self.params
    }

    /// Bind more parameters. Later bindings win on overlap.
    pub fn bind(&self, params: MetricParams) -> MetricResult<BoundMetric> {
        if let Some(param) = params
            .present()
            .into_iter()
            .find(|p| !self.metric.params.contains(p))
        {
            return Err(MetricError::UnexpectedMetricParameter {
                metric: self.metric.name().to_string(),
                param: param.to_string(),
            });
        }
        Ok(BoundMetric {
            metric: self.metric,
            params: self.params.merged(params),
        })
    }

    fn missing(&self, param: MetricParam) -> MetricError {
        MetricError::MissingMetricParameter {
            metric: self.metric.name().to_string(),
            param: param.to_string(),
        }
    }

    /// Expression computing this metric, selected under the metric name.
    ///
    /// Column metrics need `column`; table metrics ignore it.
    pub fn to_expression(&self, column: Option<&ColumnName>) -> MetricResult<NamedExpression> {
        let metric = self.metric;
        if metric.kind != MetricKind::Static {
            return Err(MetricError::NotAnExpression {
                metric: metric.name().to_string(),
                kind: metric.kind.to_string(),
            });
        }
        let col = || -> MetricResult<Expression> {
            column
                .map(|c| Expression::Column(c.clone()))
                .ok_or_else(|| MetricError::ColumnRequired {
                    metric: metric.name().to_string(),
                })
        };
        let agg = |func: AggregateFn, arg: Expression| Expression::aggregate(func, arg);

        let expr = match metric.id {
            Metrics::RowCount => Expression::CountAll,
            Metrics::ValuesCount => agg(AggregateFn::Count, col()?),
            Metrics::NullCount => Expression::count_if(Predicate::IsNull(col()?)),
            Metrics::DistinctCount => agg(AggregateFn::CountDistinct, col()?),
            Metrics::Min => agg(AggregateFn::Min, col()?),
            Metrics::Max => agg(AggregateFn::Max, col()?),
            Metrics::Mean => agg(AggregateFn::Avg, col()?),
            Metrics::Sum => agg(AggregateFn::Sum, col()?),
            Metrics::Stddev => agg(AggregateFn::StddevSamp, col()?),
            Metrics::MinLength => agg(AggregateFn::Min, Expression::length(col()?)),
            Metrics::MaxLength => agg(AggregateFn::Max, Expression::length(col()?)),
            Metrics::CountInSet => {
                let values = self
                    .params
                    .values()
                    .ok_or_else(|| self.missing(MetricParam::Values))?;
                Expression::count_if(Predicate::InList {
                    expr: col()?,
                    values: values.to_vec(),
                    negated: false,
                })
            }
            Metrics::LikeCount | Metrics::NotLikeCount => {
                let pattern = self
                    .params
                    .pattern()
                    .ok_or_else(|| self.missing(MetricParam::Pattern))?;
                Expression::count_if(Predicate::Like {
                    expr: col()?,
                    pattern: pattern.to_string(),
                    negated: metric.id == Metrics::NotLikeCount,
                })
            }
            Metrics::RegexCount => {
                let regex = self
                    .params
                    .regex()
                    .ok_or_else(|| self.missing(MetricParam::Regex))?;
                Expression::count_if(Predicate::RegexMatch {
                    expr: col()?,
                    pattern: regex.to_string(),
                })
            }
            Metrics::ColumnCount
            | Metrics::UniqueCount
            | Metrics::NullProportion
            | Metrics::DistinctProportion
            | Metrics::UniqueProportion
            | Metrics::DuplicateCount => {
                return Err(MetricError::NotAnExpression {
                    metric: metric.name().to_string(),
                    kind: metric.kind.to_string(),
                })
            }
        };
        Ok(NamedExpression::new(metric.name(), expr))
    }
}

#[cfg(test)]
#[path = "metric_test.rs"]
mod tests;
