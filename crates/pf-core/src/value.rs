//! Scalar values produced by metric queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar returned by a metric computation.
///
/// Query backends decode engine-specific types into this small set so that
/// profiles and evaluators never depend on a particular database crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum MetricValue {
    /// SQL NULL, or an aggregate over zero rows
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (counts, integer min/max)
    Int(i64),
    /// Floating point value (means, ratios, numeric min/max)
    Float(f64),
    /// Text value
    Text(String),
}

impl MetricValue {
    /// True when the value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }

    /// Numeric view of the value. Text is parsed when it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(i) => Some(*i as f64),
            MetricValue::Float(f) => Some(*f),
            MetricValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            MetricValue::Text(s) => s.trim().parse().ok(),
            MetricValue::Null => None,
        }
    }

    /// Count view of the value. Negative or fractional numbers yield `None`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MetricValue::Int(i) => u64::try_from(*i).ok(),
            MetricValue::Float(f) if *f >= 0.0 && f.fract() == 0.0 && f.is_finite() => {
                Some(*f as u64)
            }
            MetricValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Null => f.write_str("None"),
            MetricValue::Bool(b) => write!(f, "{}", b),
            MetricValue::Int(i) => write!(f, "{}", i),
            MetricValue::Float(v) => write!(f, "{}", v),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(MetricValue::Int)
            .unwrap_or(MetricValue::Float(v as f64))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Bool(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl<T: Into<MetricValue>> From<Option<T>> for MetricValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(MetricValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_views() {
        assert_eq!(MetricValue::Int(5).as_f64(), Some(5.0));
        assert_eq!(MetricValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(MetricValue::Text("3".into()).as_u64(), Some(3));
        assert_eq!(MetricValue::Int(-1).as_u64(), None);
        assert_eq!(MetricValue::Float(1.5).as_u64(), None);
        assert_eq!(MetricValue::Null.as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Int(4).to_string(), "4");
        assert_eq!(MetricValue::Float(0.25).to_string(), "0.25");
        assert_eq!(MetricValue::Text("N/A".into()).to_string(), "N/A");
        assert_eq!(MetricValue::Null.to_string(), "None");
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<MetricValue> = serde_json::from_str(r#"[null, 1, 1.5, "a", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                MetricValue::Null,
                MetricValue::Int(1),
                MetricValue::Float(1.5),
                MetricValue::Text("a".into()),
                MetricValue::Bool(true),
            ]
        );
    }
}
