//! blobcount-test - Regression test framework for blobcount
//!
//! This crate provides a small regression test framework with two modes:
//!
//! - **Compare**: run every check and report failures (default)
//! - **Display**: additionally dump label maps for visual inspection
//!
//! and synthetic raster fixtures, so tests never depend on image files.
//!
//! # Usage
//!
//! ```ignore
//! use blobcount_test::{RegParams, gray_from_ascii};
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(3.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    PADDING_BYTE, gray_from_ascii, gray_from_mask, image_from_ascii, padded_from_ascii,
    random_mask, reference_labels,
};
pub use params::{RegParams, RegTestMode};
