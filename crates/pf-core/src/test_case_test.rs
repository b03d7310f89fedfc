use super::*;

const SUITE: &str = r#"
tests:
  - name: orders_status_missing
    table: orders
    column: status
    test: columnValuesMissingCountToBeEqual
    params:
      missingCountValue: 5
      missingValueMatch: ["N/A", ""]
  - name: orders_id_unique
    table: orders
    column: id
    test: column_values_to_be_unique
  - name: orders_rows
    table: orders
    test: tableRowCountToBeBetween
    params: { minValue: 10, maxValue: 1000 }
"#;

#[test]
fn test_kind_from_str_accepts_camel_and_snake_case() {
    assert_eq!(
        "columnValuesMissingCountToBeEqual".parse::<TestCaseKind>().unwrap(),
        TestCaseKind::ColumnValuesMissingCountToBeEqual
    );
    assert_eq!(
        "table_row_count_to_equal".parse::<TestCaseKind>().unwrap(),
        TestCaseKind::TableRowCountToEqual
    );
    assert!("columnValuesToBeFancy".parse::<TestCaseKind>().is_err());
}

#[test]
fn test_kind_names_round_trip() {
    for kind in TestCaseKind::ALL {
        assert_eq!(kind.as_str().parse::<TestCaseKind>().unwrap(), kind);
    }
}

#[test]
fn test_suite_parses_in_file_order() {
    let suite = TestSuite::from_yaml(SUITE).unwrap();
    assert_eq!(suite.len(), 3);
    assert_eq!(suite.tests[0].name, "orders_status_missing");
    assert_eq!(suite.tests[1].kind(), TestCaseKind::ColumnValuesToBeUnique);
    assert_eq!(suite.tests[2].target.column, None);

    match &suite.tests[0].definition {
        TestDefinition::ColumnValuesMissingCountToBeEqual(p) => {
            assert_eq!(p.missing_count_value, 5);
            assert_eq!(
                p.missing_value_match,
                Some(vec![MetricValue::from("N/A"), MetricValue::from("")])
            );
        }
        other => panic!("unexpected definition: {:?}", other),
    }
}

#[test]
fn test_unknown_kind_is_rejected_at_load() {
    let yaml = r#"
tests:
  - name: weird
    table: orders
    column: id
    test: columnValuesToBeFancy
"#;
    let err = TestSuite::from_yaml(yaml).unwrap_err();
    match err {
        CoreError::UnsupportedTestCaseKind { name, kind } => {
            assert_eq!(name, "weird");
            assert_eq!(kind, "columnValuesToBeFancy");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_column_kind_requires_column() {
    let yaml = r#"
tests:
  - name: no_column
    table: orders
    test: columnValuesToBeNotNull
"#;
    let err = TestSuite::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTestParams { .. }));
}

#[test]
fn test_missing_required_param() {
    let yaml = r#"
tests:
  - name: missing_value
    table: orders
    test: tableRowCountToEqual
"#;
    let err = TestSuite::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("missing_value"));
}

#[test]
fn test_between_requires_a_bound() {
    let err = TestDefinition::from_params(
        TestCaseKind::ColumnValuesToBeBetween,
        serde_yaml::Value::Null,
    )
    .unwrap_err();
    assert!(err.contains("minValue"));
}

#[test]
fn test_set_values_keep_their_yaml_types() {
    let yaml = r#"
tests:
  - name: priority_in_set
    table: orders
    column: priority
    test: columnValuesToBeInSet
    params:
      allowedValues: [1, 2, 3.5, high]
  - name: amount_missing
    table: orders
    column: amount
    test: columnValuesMissingCountToBeEqual
    params:
      missingCountValue: 0
      missingValueMatch: [-1]
"#;
    let suite = TestSuite::from_yaml(yaml).unwrap();
    match &suite.tests[0].definition {
        TestDefinition::ColumnValuesToBeInSet(p) => assert_eq!(
            p.allowed_values,
            vec![
                MetricValue::Int(1),
                MetricValue::Int(2),
                MetricValue::Float(3.5),
                MetricValue::from("high"),
            ]
        ),
        other => panic!("unexpected definition: {:?}", other),
    }
    match &suite.tests[1].definition {
        TestDefinition::ColumnValuesMissingCountToBeEqual(p) => {
            assert_eq!(p.missing_value_match, Some(vec![MetricValue::Int(-1)]));
        }
        other => panic!("unexpected definition: {:?}", other),
    }
}

#[test]
fn test_duplicate_names_rejected() {
    let yaml = r#"
tests:
  - name: dup
    table: orders
    column: id
    test: columnValuesToBeUnique
  - name: dup
    table: orders
    column: id
    test: columnValuesToBeNotNull
"#;
    let err = TestSuite::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateTestCase { .. }));
}

#[test]
fn test_target_display() {
    let case = TestCase::for_column(
        "t",
        "orders",
        "status",
        TestDefinition::ColumnValuesToBeNotNull,
    );
    assert_eq!(case.target.to_string(), "orders.status");
}
