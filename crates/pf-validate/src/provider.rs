//! Hands out query runners for supplemental computations

use pf_core::TableProfile;
use pf_db::Database;
use pf_metrics::{DbQueryRunner, ProfileSample, QueryRunner};
use pf_sql::SqlDialect;

/// Produces a [`QueryRunner`] for the table a profile describes
pub trait RunnerProvider: Send + Sync {
    /// Runner over the rows `profile` was computed on, or `None` when the
    /// table cannot be queried
    fn runner(&self, profile: &TableProfile) -> Option<Box<dyn QueryRunner + '_>>;
}

/// Provides [`DbQueryRunner`]s over one database connection
///
/// Each runner samples the way its profile was sampled, so supplemental
/// counts cover the same rows as the profile counts they are compared with.
pub struct DbRunnerProvider<'a> {
    db: &'a dyn Database,
    dialect: &'a dyn SqlDialect,
}

impl<'a> DbRunnerProvider<'a> {
    /// Create a provider over `db`
    pub fn new(db: &'a dyn Database, dialect: &'a dyn SqlDialect) -> Self {
        Self { db, dialect }
    }
}

impl RunnerProvider for DbRunnerProvider<'_> {
    fn runner(&self, profile: &TableProfile) -> Option<Box<dyn QueryRunner + '_>> {
        let sample = profile.sample.as_ref().and_then(ProfileSample::from_config);
        let runner =
            DbQueryRunner::new(self.db, self.dialect, profile.name.clone()).with_sample(sample);
        Some(Box::new(runner))
    }
}
