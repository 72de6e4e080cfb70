//! Error types for blobcount-core
//!
//! Provides a unified error type for the raster container and geometry
//! types. Each variant captures enough context for diagnostics without
//! exposing the buffer layout.

use thiserror::Error;

/// blobcount-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row stride shorter than one row of pixels
    #[error("invalid stride: {stride} bytes is shorter than a {row_bytes}-byte row")]
    InvalidStride { stride: usize, row_bytes: usize },

    /// Pixel buffer shorter than `stride * (height - 1) + row_bytes`
    #[error("pixel buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Pixel coordinates outside the image
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Pixel value does not match the format's pixel size
    #[error("pixel value has {actual} bytes, format needs {expected}")]
    PixelSizeMismatch { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unsupported pixel format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for blobcount-core operations
pub type Result<T> = std::result::Result<T, Error>;
