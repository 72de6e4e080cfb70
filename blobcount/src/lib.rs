//! blobcount - Blob counting for Rust
//!
//! Labels the 8-connected foreground regions ("blobs") of a binary raster,
//! filters them by size, orders them and extracts each one as its own image.
//!
//! # Overview
//!
//! - Raw raster containers with explicit row stride (gray8, rgb24, rgba32)
//! - Scan-line union-find and flood fill labeling
//! - Size filtering with independent or coupled width/height limits
//! - Sub-image extraction in blob or source size
//! - Blob-based filters: size filtering, component coloring and biggest
//!   blob extraction
//!
//! # Example
//!
//! ```
//! use blobcount::{BlobCounter, ObjectsOrder, PixelFormat, RawImage};
//!
//! let mut image = RawImage::new(16, 16, PixelFormat::Gray8).unwrap();
//! for x in 2..6 {
//!     image.set_pixel(x, 3, &[255]).unwrap();
//! }
//! image.set_pixel(12, 12, &[255]).unwrap();
//!
//! let mut counter = BlobCounter::new().with_objects_order(ObjectsOrder::Size);
//! counter.process_image(image.view()).unwrap();
//!
//! let rects = counter.objects_rectangles().unwrap();
//! assert_eq!(rects.len(), 2);
//! assert_eq!(rects[0].w, 4);
//! ```

// Re-export core types (raster containers and geometry)
pub use blobcount_core::*;

// Re-export the region crate as a module
pub use blobcount_region as region;

// Engine types at the top level
pub use blobcount_region::{
    Blob, BlobCounter, ObjectsOrder, RecursiveBlobCounter, RegionError, RegionResult, SizeFilter,
};
