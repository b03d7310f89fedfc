//! Profile command implementation

use anyhow::{Context, Result};
use pf_core::TableProfile;
use pf_metrics::SampleMode;
use pf_sql::dialect_for;

use crate::cli::{GlobalArgs, ProfileArgs};
use crate::commands::common::{
    build_profiles, configured_sample, create_database_connection, load_project, parse_list,
    print_table, resolve_tables,
};

fn display_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn summary_row(profile: &TableProfile) -> Vec<String> {
    vec![
        profile.name.to_string(),
        display_count(profile.row_count),
        display_count(profile.column_count),
    ]
}

/// Execute the profile command
pub async fn execute(args: &ProfileArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = create_database_connection(&project, global.target.as_deref()).await?;
    let dialect = dialect_for(project.config.dialect);

    let tables = resolve_tables(db.as_ref(), &project, parse_list(args.tables.as_deref())).await?;
    if tables.is_empty() {
        println!("No tables to profile.");
        return Ok(());
    }

    let sample = configured_sample(&project);
    let mode = if args.sample {
        if sample.is_none() {
            log::warn!("No profile_sample configured; --sample profiles full tables");
        }
        SampleMode::Sample
    } else {
        SampleMode::Full
    };

    println!("Profiling {} table(s)...\n", tables.len());
    let profiles = build_profiles(db.as_ref(), dialect.as_ref(), &tables, sample, mode).await?;

    let output = project.config.profile_output_path(&project.root);
    profiles
        .save(&output)
        .with_context(|| format!("Failed to write profiles to {}", output.display()))?;

    let rows: Vec<Vec<String>> = profiles.iter().map(summary_row).collect();
    print_table(&["TABLE", "ROWS", "COLUMNS"], &rows);
    println!("\nProfiles written to {}", output.display());
    Ok(())
}
