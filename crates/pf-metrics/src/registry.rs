//! The fixed set of metrics known to the profiler

use crate::error::{MetricError, MetricResult};
use crate::metric::{Metric, MetricKind, MetricParam, MetricScope};
use std::fmt;

/// Every registered metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metrics {
    RowCount,
    ColumnCount,
    ValuesCount,
    NullCount,
    DistinctCount,
    UniqueCount,
    Min,
    Max,
    Mean,
    Sum,
    Stddev,
    MinLength,
    MaxLength,
    CountInSet,
    LikeCount,
    NotLikeCount,
    RegexCount,
    NullProportion,
    DistinctProportion,
    UniqueProportion,
    DuplicateCount,
}

macro_rules! define_metrics {
    ($( $id:ident => $stat:ident { $name:literal, $scope:ident, $kind:ident, [$($param:ident),*], $desc:literal } )*) => {
        $(
            static $stat: Metric = Metric {
                id: Metrics::$id,
                scope: MetricScope::$scope,
                kind: MetricKind::$kind,
                params: &[$(MetricParam::$param),*],
                description: $desc,
            };
        )*

        impl Metrics {
            /// All metrics in registry order
            pub const ALL: [Metrics; 21] = [$(Metrics::$id),*];

            /// camelCase metric name
            pub fn name(self) -> &'static str {
                match self {
                    $(Metrics::$id => $name,)*
                }
            }

            /// Definition of this metric
            pub fn metric(self) -> &'static Metric {
                match self {
                    $(Metrics::$id => &$stat,)*
                }
            }
        }
    };
}

define_metrics! {
    RowCount => ROW_COUNT { "rowCount", Table, Static, [], "Number of rows" }
    ColumnCount => COLUMN_COUNT { "columnCount", Table, Schema, [], "Number of columns" }
    ValuesCount => VALUES_COUNT { "valuesCount", Column, Static, [], "Number of non-null values" }
    NullCount => NULL_COUNT { "nullCount", Column, Static, [], "Number of null values" }
    DistinctCount => DISTINCT_COUNT { "distinctCount", Column, Static, [], "Number of distinct non-null values" }
    UniqueCount => UNIQUE_COUNT { "uniqueCount", Column, Grouped, [], "Number of values occurring exactly once" }
    Min => MIN { "min", Column, Static, [], "Smallest value" }
    Max => MAX { "max", Column, Static, [], "Largest value" }
    Mean => MEAN { "mean", Column, Static, [], "Arithmetic mean" }
    Sum => SUM { "sum", Column, Static, [], "Sum of values" }
    Stddev => STDDEV { "stddev", Column, Static, [], "Sample standard deviation" }
    MinLength => MIN_LENGTH { "minLength", Column, Static, [], "Shortest text length" }
    MaxLength => MAX_LENGTH { "maxLength", Column, Static, [], "Longest text length" }
    CountInSet => COUNT_IN_SET { "countInSet", Column, Static, [Values], "Number of values in a given set" }
    LikeCount => LIKE_COUNT { "likeCount", Column, Static, [Pattern], "Number of values matching a LIKE pattern" }
    NotLikeCount => NOT_LIKE_COUNT { "notLikeCount", Column, Static, [Pattern], "Number of values not matching a LIKE pattern" }
    RegexCount => REGEX_COUNT { "regexCount", Column, Static, [Regex], "Number of values matching a regular expression" }
    NullProportion => NULL_PROPORTION { "nullProportion", Column, Composed, [], "nullCount / (valuesCount + nullCount)" }
    DistinctProportion => DISTINCT_PROPORTION { "distinctProportion", Column, Composed, [], "distinctCount / valuesCount" }
    UniqueProportion => UNIQUE_PROPORTION { "uniqueProportion", Column, Composed, [], "uniqueCount / valuesCount" }
    DuplicateCount => DUPLICATE_COUNT { "duplicateCount", Column, Composed, [], "valuesCount - uniqueCount" }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name-based lookup into the fixed metric set
pub struct MetricRegistry;

impl MetricRegistry {
    /// Look up a metric by its camelCase name
    pub fn get(name: &str) -> MetricResult<&'static Metric> {
        Metrics::ALL
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.metric())
            .ok_or_else(|| MetricError::UnknownMetric {
                name: name.to_string(),
            })
    }

    /// Every metric definition in registry order
    pub fn all() -> impl Iterator<Item = &'static Metric> {
        Metrics::ALL.into_iter().map(Metrics::metric)
    }
}
