//! Engine-agnostic metric expressions
//!
//! Metrics describe *what* to compute as an [`Expression`] tree; a
//! [`SqlDialect`](crate::SqlDialect) decides how it is spelled for a given
//! engine.

use pf_core::{ColumnName, MetricValue, SampleConfig};

/// Aggregate functions metric expressions may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    /// `COUNT(expr)` - non-null values
    Count,
    /// `COUNT(DISTINCT expr)`
    CountDistinct,
    /// `MIN(expr)`
    Min,
    /// `MAX(expr)`
    Max,
    /// `AVG(expr)`, rendered as a double
    Avg,
    /// `SUM(expr)`, rendered as a double
    Sum,
    /// Sample standard deviation, rendered as a double
    StddevSamp,
}

impl AggregateFn {
    /// SQL function name
    pub fn sql_name(self) -> &'static str {
        match self {
            AggregateFn::Count | AggregateFn::CountDistinct => "COUNT",
            AggregateFn::Min => "MIN",
            AggregateFn::Max => "MAX",
            AggregateFn::Avg => "AVG",
            AggregateFn::Sum => "SUM",
            AggregateFn::StddevSamp => "STDDEV_SAMP",
        }
    }

    /// True when the result is cast to a double so engines agree on the type
    pub fn yields_double(self) -> bool {
        matches!(
            self,
            AggregateFn::Avg | AggregateFn::Sum | AggregateFn::StddevSamp
        )
    }
}

/// A scalar SQL expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Column reference
    Column(ColumnName),
    /// Literal value
    Literal(MetricValue),
    /// `COUNT(*)`
    CountAll,
    /// Aggregate over an inner expression
    Aggregate {
        func: AggregateFn,
        arg: Box<Expression>,
    },
    /// Number of rows satisfying a predicate
    CountIf(Box<Predicate>),
    /// Character length of a text expression
    Length(Box<Expression>),
    /// Ad-hoc SQL, validated with the dialect's parser before rendering
    Raw(String),
}

impl Expression {
    /// Column reference
    pub fn column(name: impl Into<ColumnName>) -> Self {
        Expression::Column(name.into())
    }

    /// Aggregate `func` over `arg`
    pub fn aggregate(func: AggregateFn, arg: Expression) -> Self {
        Expression::Aggregate {
            func,
            arg: Box::new(arg),
        }
    }

    /// Count of rows where `predicate` holds
    pub fn count_if(predicate: Predicate) -> Self {
        Expression::CountIf(Box::new(predicate))
    }

    /// Character length of `expr`
    pub fn length(expr: Expression) -> Self {
        Expression::Length(Box::new(expr))
    }
}

/// A boolean condition used inside [`Expression::CountIf`]
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `expr IS NULL`
    IsNull(Expression),
    /// `expr IS NOT NULL`
    IsNotNull(Expression),
    /// `expr [NOT] IN (values)`
    InList {
        expr: Expression,
        values: Vec<MetricValue>,
        negated: bool,
    },
    /// `expr [NOT] LIKE pattern`
    Like {
        expr: Expression,
        pattern: String,
        negated: bool,
    },
    /// Regular expression match, spelled per dialect
    RegexMatch { expr: Expression, pattern: String },
}

/// An expression with the output name it is selected under
#[derive(Debug, Clone, PartialEq)]
pub struct NamedExpression {
    /// Output column name (the metric name)
    pub name: String,
    /// Expression to compute
    pub expr: Expression,
}

impl NamedExpression {
    /// Pair an expression with its output name
    pub fn new(name: impl Into<String>, expr: Expression) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// Sampling applied to the profiled table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileSample {
    /// Bernoulli sample of roughly `percent` of the rows
    Percent { percent: f64, seed: u64 },
    /// Fixed-size sample of `rows` rows
    Rows { rows: u64, seed: u64 },
}

impl ProfileSample {
    /// Seed making the sample repeatable
    pub fn seed(&self) -> u64 {
        match self {
            ProfileSample::Percent { seed, .. } | ProfileSample::Rows { seed, .. } => *seed,
        }
    }

    /// Config block describing this sample, as recorded on a profile
    pub fn to_config(&self) -> SampleConfig {
        match *self {
            ProfileSample::Percent { percent, seed } => SampleConfig {
                percent: Some(percent),
                rows: None,
                seed,
            },
            ProfileSample::Rows { rows, seed } => SampleConfig {
                percent: None,
                rows: Some(rows),
                seed,
            },
        }
    }

    /// Build from a validated `profile_sample` config block
    pub fn from_config(config: &SampleConfig) -> Option<Self> {
        match (config.percent, config.rows) {
            (Some(percent), _) => Some(ProfileSample::Percent {
                percent,
                seed: config.seed,
            }),
            (None, Some(rows)) => Some(ProfileSample::Rows {
                rows,
                seed: config.seed,
            }),
            (None, None) => None,
        }
    }
}
