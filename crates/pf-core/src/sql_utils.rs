//! SQL quoting helpers
//!
//! Identifiers and literals that reach generated SQL go through these
//! functions, so table/column names and user-supplied match values can
//! never break out of their quoting.

use crate::value::MetricValue;

/// Quote a SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use pf_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("status"), r#""status""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name component by component.
///
/// # Examples
/// ```
/// use pf_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("analytics.orders"), r#""analytics"."orders""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Split `schema.table` on the last dot, falling back to `default_schema`.
///
/// # Examples
/// ```
/// use pf_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("orders", "main"), ("main", "orders"));
/// assert_eq!(split_qualified_name("raw.orders", "main"), ("raw", "orders"));
/// ```
pub fn split_qualified_name<'a>(name: &'a str, default_schema: &'a str) -> (&'a str, &'a str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => (default_schema, name),
    }
}

/// Escape a value for use inside a single-quoted SQL string literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a scalar as a SQL literal.
///
/// Non-finite floats have no SQL spelling and render as NULL.
pub fn sql_literal(value: &MetricValue) -> String {
    match value {
        MetricValue::Null => "NULL".to_string(),
        MetricValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        MetricValue::Int(i) => i.to_string(),
        MetricValue::Float(f) if f.is_finite() => f.to_string(),
        MetricValue::Float(_) => "NULL".to_string(),
        MetricValue::Text(s) => format!("'{}'", escape_sql_string(s)),
    }
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
