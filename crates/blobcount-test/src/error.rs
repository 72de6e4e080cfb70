//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// ASCII-art fixture could not be parsed
    #[error("bad fixture at row {row}: {message}")]
    Fixture { row: usize, message: String },

    /// Mask length does not match the requested size
    #[error("mask has {actual} entries, expected {expected}")]
    MaskSize { expected: usize, actual: usize },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
