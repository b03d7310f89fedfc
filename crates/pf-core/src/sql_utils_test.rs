use super::*;

#[test]
fn test_quote_ident_escapes_quotes() {
    assert_eq!(quote_ident(r#"a"b"#), r#""a""b""#);
    assert_eq!(quote_ident("schema.table"), r#""schema.table""#);
}

#[test]
fn test_quote_qualified_parts() {
    assert_eq!(quote_qualified("orders"), r#""orders""#);
    assert_eq!(quote_qualified("db.raw.orders"), r#""db"."raw"."orders""#);
}

#[test]
fn test_split_qualified_name() {
    assert_eq!(split_qualified_name("a.b.c", "main"), ("a.b", "c"));
    assert_eq!(split_qualified_name("c", "public"), ("public", "c"));
}

#[test]
fn test_sql_literal() {
    assert_eq!(sql_literal(&MetricValue::Text("it's".into())), "'it''s'");
    assert_eq!(sql_literal(&MetricValue::Int(-3)), "-3");
    assert_eq!(sql_literal(&MetricValue::Float(1.5)), "1.5");
    assert_eq!(sql_literal(&MetricValue::Float(f64::NAN)), "NULL");
    assert_eq!(sql_literal(&MetricValue::Bool(true)), "TRUE");
    assert_eq!(sql_literal(&MetricValue::Null), "NULL");
}
