use super::*;
use crate::registry::MetricRegistry;

fn status() -> ColumnName {
    ColumnName::new("status")
}

#[test]
fn test_bind_is_associative() {
    let metric = MetricRegistry::get("countInSet").unwrap();
    let a = MetricParams::new().with_values(["N/A"]);
    let b = MetricParams::new();

    let stepwise = metric.bind(a.clone()).unwrap().bind(b).unwrap();
    let at_once = metric.bind(a).unwrap();
    assert_eq!(stepwise, at_once);
}

#[test]
fn test_later_binding_wins() {
    let metric = Metrics::LikeCount.metric();
    let bound = metric
        .bind(MetricParams::new().with_pattern("a%"))
        .unwrap()
        .bind(MetricParams::new().with_pattern("b%"))
        .unwrap();
    assert_eq!(bound.params().pattern(), Some("b%"));
}

#[test]
fn test_bind_returns_new_value() {
    let unbound = BoundMetric::unbound(Metrics::CountInSet.metric());
    let bound = unbound
        .bind(MetricParams::new().with_values(["x"]))
        .unwrap();
    assert!(unbound.params().is_empty());
    assert_eq!(bound.params().values(), Some(&[MetricValue::from("x")][..]));
}

#[test]
fn test_unexpected_parameter_rejected() {
    let err = Metrics::NullCount
        .metric()
        .bind(MetricParams::new().with_regex(".*"))
        .unwrap_err();
    assert_eq!(
        err,
        MetricError::UnexpectedMetricParameter {
            metric: "nullCount".to_string(),
            param: "regex".to_string(),
        }
    );
}

#[test]
fn test_unbound_parameter_cannot_run() {
    let unbound = BoundMetric::unbound(Metrics::CountInSet.metric());
    let err = unbound.to_expression(Some(&status())).unwrap_err();
    assert_eq!(
        err,
        MetricError::MissingMetricParameter {
            metric: "countInSet".to_string(),
            param: "values".to_string(),
        }
    );
}

#[test]
fn test_to_expression_names_output_after_metric() {
    let bound = Metrics::CountInSet
        .metric()
        .bind(MetricParams::new().with_values(["N/A", ""]))
        .unwrap();
    let named = bound.to_expression(Some(&status())).unwrap();
    assert_eq!(named.name, "countInSet");
    assert_eq!(
        named.expr,
        Expression::count_if(Predicate::InList {
            expr: Expression::Column(status()),
            values: vec!["N/A".into(), "".into()],
            negated: false,
        })
    );
}

#[test]
fn test_table_metric_ignores_column() {
    let named = BoundMetric::unbound(Metrics::RowCount.metric())
        .to_expression(None)
        .unwrap();
    assert_eq!(named.expr, Expression::CountAll);
}

#[test]
fn test_column_metric_needs_column() {
    let err = BoundMetric::unbound(Metrics::NullCount.metric())
        .to_expression(None)
        .unwrap_err();
    assert!(matches!(err, MetricError::ColumnRequired { .. }));
}

#[test]
fn test_non_static_metrics_have_no_expression() {
    for id in [
        Metrics::UniqueCount,
        Metrics::ColumnCount,
        Metrics::NullProportion,
    ] {
        let err = BoundMetric::unbound(id.metric())
            .to_expression(Some(&status()))
            .unwrap_err();
        assert!(
            matches!(err, MetricError::NotAnExpression { .. }),
            "{id}: {err}"
        );
    }
}

#[test]
fn test_composed_metrics() {
    let mut profile = ColumnProfile::new("status");
    profile.values_count = Some(8);
    profile.null_count = Some(2);
    profile.distinct_count = Some(4);
    profile.unique_count = Some(3);

    assert_eq!(
        Metrics::NullProportion.metric().compute(&profile),
        Some(MetricValue::Float(0.2))
    );
    assert_eq!(
        Metrics::DistinctProportion.metric().compute(&profile),
        Some(MetricValue::Float(0.5))
    );
    assert_eq!(
        Metrics::DuplicateCount.metric().compute(&profile),
        Some(MetricValue::Int(5))
    );
    assert_eq!(Metrics::NullCount.metric().compute(&profile), None);
}

#[test]
fn test_composed_metric_with_missing_or_zero_inputs() {
    let mut profile = ColumnProfile::new("status");
    assert_eq!(Metrics::UniqueProportion.metric().compute(&profile), None);

    profile.values_count = Some(0);
    profile.unique_count = Some(0);
    assert_eq!(Metrics::UniqueProportion.metric().compute(&profile), None);
}
