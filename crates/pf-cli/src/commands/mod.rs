//! CLI command implementations

pub(crate) mod common;
pub(crate) mod metrics;
pub(crate) mod profile;
pub(crate) mod validate;
