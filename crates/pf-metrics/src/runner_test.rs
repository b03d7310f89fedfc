use super::*;
use crate::metric::MetricParams;
use crate::registry::Metrics;
use pf_db::DuckDbBackend;
use pf_sql::{DuckDbDialect, Expression};

async fn orders_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE orders (id INTEGER, status VARCHAR);
         INSERT INTO orders VALUES
           (1, 'open'), (2, 'N/A'), (3, NULL), (4, 'open'), (5, 'closed');",
    )
    .await
    .unwrap();
    db
}

fn status() -> ColumnName {
    ColumnName::new("status")
}

#[tokio::test]
async fn test_run_returns_named_values() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    let exprs = [
        NamedExpression::new("rowCount", Expression::CountAll),
        BoundMetric::unbound(Metrics::NullCount.metric())
            .to_expression(Some(&status()))
            .unwrap(),
    ];
    let row = runner.run(&exprs, SampleMode::Full).await.unwrap();
    assert_eq!(row.get("rowCount"), Some(&MetricValue::Int(5)));
    assert_eq!(row.get("nullCount"), Some(&MetricValue::Int(1)));
}

#[tokio::test]
async fn test_compute_count_in_set() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    let bound = Metrics::CountInSet
        .metric()
        .bind(MetricParams::new().with_values(["N/A", "closed"]))
        .unwrap();
    let value = runner
        .compute(&bound, Some(&status()), SampleMode::Full)
        .await
        .unwrap();
    assert_eq!(value, MetricValue::Int(2));
}

#[tokio::test]
async fn test_count_in_set_on_empty_table_is_zero() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE empty (status VARCHAR)")
        .await
        .unwrap();
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("empty"));

    let bound = Metrics::CountInSet
        .metric()
        .bind(MetricParams::new().with_values(["x"]))
        .unwrap();
    let value = runner
        .compute(&bound, Some(&status()), SampleMode::Sample)
        .await
        .unwrap();
    assert_eq!(value, MetricValue::Int(0));
}

#[tokio::test]
async fn test_run_grouped_includes_group_key() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    let mut rows = runner
        .run_grouped(
            &[NamedExpression::new("frequency", Expression::CountAll)],
            &status(),
            SampleMode::Full,
        )
        .await
        .unwrap();
    rows.retain(|r| r.get("value") == Some(&MetricValue::from("open")));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("frequency"), Some(&MetricValue::Int(2)));
}

#[tokio::test]
async fn test_resolve_column() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    assert_eq!(runner.resolve_column("status").await.unwrap().name, "status");
    assert_eq!(runner.resolve_column("STATUS").await.unwrap().name, "status");

    let err = runner.resolve_column("missing").await.unwrap_err();
    match err {
        RunnerError::ColumnNotFound { table, column } => {
            assert_eq!(table, "orders");
            assert_eq!(column, "missing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_table_is_query_execution_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("nowhere"));

    let err = runner
        .run(
            &[NamedExpression::new("rowCount", Expression::CountAll)],
            SampleMode::Full,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RunnerError::QueryExecution { .. }), "{err}");

    let err = runner.columns().await.unwrap_err();
    assert!(matches!(
        err,
        RunnerError::QueryExecution {
            source: DbError::TableNotFound(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_invalid_raw_expression() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    let err = runner
        .run(
            &[NamedExpression::new("bad", Expression::Raw("SUM(".to_string()))],
            SampleMode::Full,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RunnerError::InvalidExpression { .. }));
}

#[tokio::test]
async fn test_unbound_metric_surfaces_metric_error() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"));

    let err = runner
        .compute(
            &BoundMetric::unbound(Metrics::RegexCount.metric()),
            Some(&status()),
            SampleMode::Full,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RunnerError::Metric(_)));
}

#[tokio::test]
async fn test_full_sample_behaves_as_full_table() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders")).with_sample(Some(
        ProfileSample::Percent {
            percent: 100.0,
            seed: 42,
        },
    ));

    let row = runner
        .select_first_from_sample(&[NamedExpression::new("rowCount", Expression::CountAll)])
        .await
        .unwrap();
    assert_eq!(row.get("rowCount"), Some(&MetricValue::Int(5)));
}

#[tokio::test]
async fn test_reservoir_sample_caps_rows() {
    let db = orders_db().await;
    let dialect = DuckDbDialect::new();
    let runner = DbQueryRunner::new(&db, &dialect, TableName::new("orders"))
        .with_sample(Some(ProfileSample::Rows { rows: 2, seed: 7 }));

    let exprs = [NamedExpression::new("rowCount", Expression::CountAll)];
    let sampled = runner.select_first_from_sample(&exprs).await.unwrap();
    let full = runner.select_first_from_table(&exprs).await.unwrap();
    assert_eq!(sampled.get("rowCount"), Some(&MetricValue::Int(2)));
    assert_eq!(full.get("rowCount"), Some(&MetricValue::Int(5)));
}
