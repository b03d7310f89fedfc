//! Error types for pf-core

use thiserror::Error;

/// Core error type for the profiler
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Test case kind has no known definition
    #[error("[E003] Unsupported test case kind '{kind}' in test case '{name}'")]
    UnsupportedTestCaseKind { name: String, kind: String },

    /// E004: Test case parameters do not match its kind
    #[error("[E004] Invalid parameters for test case '{name}': {message}")]
    InvalidTestParams { name: String, message: String },

    /// E005: Two test cases share a name within one suite
    #[error("[E005] Duplicate test case name: {name}")]
    DuplicateTestCase { name: String },

    /// E006: Profile file not found
    #[error("[E006] Profile file not found: {path}")]
    ProfileNotFound { path: String },

    /// E007: IO error with file path context
    #[error("[E007] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E008: YAML parse error
    #[error("[E008] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E009: JSON serialization/deserialization error
    #[error("[E009] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
