//! Metrics command implementation

use anyhow::Result;
use pf_metrics::{Metric, MetricRegistry};

use crate::commands::common::print_table;

fn metric_row(metric: &Metric) -> Vec<String> {
    let params: Vec<&str> = metric.params().iter().map(|p| p.name()).collect();
    vec![
        metric.name().to_string(),
        metric.scope().to_string(),
        metric.kind().to_string(),
        if params.is_empty() {
            "-".to_string()
        } else {
            params.join(", ")
        },
        metric.description().to_string(),
    ]
}

/// Execute the metrics command
pub fn execute() -> Result<()> {
    let rows: Vec<Vec<String>> = MetricRegistry::all().map(metric_row).collect();
    print_table(&["NAME", "SCOPE", "KIND", "PARAMS", "DESCRIPTION"], &rows);
    Ok(())
}
