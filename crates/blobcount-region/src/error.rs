//! Error types for blobcount-region

use blobcount_core::PixelFormat;
use thiserror::Error;

/// Errors that can occur during labeling, filtering and extraction
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),

    /// Pixel format not supported by the requested operation
    #[error("unsupported format for {operation}: {format}")]
    UnsupportedFormat {
        operation: &'static str,
        format: PixelFormat,
    },

    /// Degenerate or mismatched image geometry
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Objects were requested before any image was processed
    #[error("image should be processed before collecting objects")]
    NotProcessedYet,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
