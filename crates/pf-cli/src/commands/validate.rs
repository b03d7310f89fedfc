//! Validate command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use pf_core::{ProfileSet, TestCase, TestCaseResult, TestCaseStatus, TestSuite};
use pf_metrics::SampleMode;
use pf_sql::dialect_for;
use pf_validate::{DbRunnerProvider, LogDiagnostics, ValidationDispatcher, ValidationSummary};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{GlobalArgs, ValidateArgs, ValidateOutput};
use crate::commands::common::{
    build_profiles, configured_sample, create_database_connection, load_project, ExitCode,
};

/// One verdict as written by `--output json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerdictRecord<'a> {
    name: &'a str,
    table: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<&'a str>,
    test: String,
    #[serde(flatten)]
    verdict: &'a TestCaseResult,
}

impl<'a> VerdictRecord<'a> {
    fn new(case: &'a TestCase, verdict: &'a TestCaseResult) -> Self {
        Self {
            name: &case.name,
            table: case.target.table.as_str(),
            column: case.target.column.as_deref(),
            test: case.kind().to_string(),
            verdict,
        }
    }
}

fn status_marker(status: TestCaseStatus) -> &'static str {
    match status {
        TestCaseStatus::Success => "✓",
        TestCaseStatus::Failed => "✗",
        TestCaseStatus::Aborted => "!",
    }
}

/// Tables the suite refers to, in name order
fn suite_tables(cases: &[TestCase]) -> Vec<String> {
    cases
        .iter()
        .map(|c| c.target.table.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let suite_path = project.config.test_suite_path(&project.root);
    let suite = TestSuite::load(&suite_path)
        .with_context(|| format!("Failed to load test suite {}", suite_path.display()))?;
    if suite.is_empty() {
        println!("No test cases to run.");
        return Ok(());
    }

    let dispatcher = ValidationDispatcher::with_default_evaluators()?;
    let plan = dispatcher.prepare(&suite.tests)?;

    let db = create_database_connection(&project, global.target.as_deref()).await?;
    let dialect = dialect_for(project.config.dialect);

    let profiles_path = args
        .profiles
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| project.config.profile_output_path(&project.root));
    let profiles = if profiles_path.exists() {
        ProfileSet::load(&profiles_path)
            .with_context(|| format!("Failed to load profiles {}", profiles_path.display()))?
    } else {
        log::info!(
            "No profiles at {}; profiling suite tables",
            profiles_path.display()
        );
        let tables = suite_tables(&suite.tests);
        build_profiles(
            db.as_ref(),
            dialect.as_ref(),
            &tables,
            configured_sample(&project),
            SampleMode::Full,
        )
        .await?
    };

    let provider = DbRunnerProvider::new(db.as_ref(), dialect.as_ref());
    let diagnostics = LogDiagnostics::new();
    log::debug!(
        "Validating {} test case(s), run {}",
        plan.len(),
        diagnostics.run_id()
    );

    let start = Instant::now();
    let results = plan
        .run(&profiles, Utc::now(), Some(&provider), &diagnostics)
        .await;
    let summary = ValidationSummary::from_results(&results, start.elapsed());

    match args.output {
        ValidateOutput::Text => {
            println!("Running {} test cases...\n", suite.len());
            for (case, verdict) in suite.tests.iter().zip(&results) {
                println!(
                    "  {} {} [{}] - {}",
                    status_marker(verdict.status),
                    case.name,
                    verdict.status,
                    verdict.result
                );
            }
            println!();
            println!(
                "Success: {}, Failed: {}, Aborted: {} [{}ms]",
                summary.success,
                summary.failed,
                summary.aborted,
                summary.duration.as_millis()
            );
        }
        ValidateOutput::Json => {
            let records: Vec<VerdictRecord<'_>> = suite
                .tests
                .iter()
                .zip(&results)
                .map(|(case, verdict)| VerdictRecord::new(case, verdict))
                .collect();
            let json =
                serde_json::to_string_pretty(&records).context("Failed to serialize results")?;
            println!("{}", json);
        }
    }

    if !summary.all_passed() {
        return Err(ExitCode(2).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pf_core::TestDefinition;

    #[test]
    fn test_suite_tables_dedup_sorted() {
        let cases = vec![
            TestCase::for_table("a", "orders", TestDefinition::ColumnValuesToBeUnique),
            TestCase::for_column("b", "customers", "id", TestDefinition::ColumnValuesToBeUnique),
            TestCase::for_column("c", "orders", "id", TestDefinition::ColumnValuesToBeNotNull),
        ];
        assert_eq!(suite_tables(&cases), vec!["customers", "orders"]);
    }

    #[test]
    fn test_verdict_record_json() {
        let case =
            TestCase::for_column("id_unique", "orders", "id", TestDefinition::ColumnValuesToBeUnique);
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let verdict = TestCaseResult::aborted(ts, "no profile");

        let json = serde_json::to_value(VerdictRecord::new(&case, &verdict)).unwrap();
        assert_eq!(json["name"], "id_unique");
        assert_eq!(json["column"], "id");
        assert_eq!(json["test"], "columnValuesToBeUnique");
        assert_eq!(json["testCaseStatus"], "Aborted");
        assert_eq!(json["timestamp"], 1_700_000_000_i64);
    }
}
