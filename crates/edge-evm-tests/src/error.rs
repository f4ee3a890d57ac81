//! Error types for EVM fixtures

use thiserror::Error;

/// Test error type
#[derive(Error, Debug)]
pub enum TestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Assertion failed
    #[error("Assertion failed: {0}")]
    Assertion(String),
}

/// Test result type
pub type TestResult<T> = Result<T, TestError>;
