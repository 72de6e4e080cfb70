//! blobcount-region - Blob counting for blobcount
//!
//! This crate turns binary images into labeled 8-connected objects:
//!
//! - **Labeling** - scan-line union-find ([`ScanlineLabeler`]) and flood fill
//!   ([`FloodFillLabeler`]) labelers producing a [`LabelMap`]
//! - **Blob counting** - [`BlobCounter`] filters objects by size, reports
//!   their rectangles in a chosen [`ObjectsOrder`] and extracts their pixels
//! - **Blob filters** - [`BlobsFiltering`], [`ConnectedComponentsLabeling`]
//!   and [`ExtractBiggestBlob`]
//!
//! Any pixel with a non-zero color byte is foreground. Gray8, Rgb24 and
//! Rgba32 images are accepted (flood fill labeling reads Gray8 only).
//!
//! # Examples
//!
//! ## Counting blobs
//!
//! ```
//! use blobcount_core::{PixelFormat, RawImage};
//! use blobcount_region::BlobCounter;
//!
//! let mut image = RawImage::new(10, 10, PixelFormat::Gray8).unwrap();
//! image.set_pixel(1, 1, &[255]).unwrap();
//! image.set_pixel(2, 2, &[255]).unwrap();
//! image.set_pixel(7, 7, &[255]).unwrap();
//!
//! let mut counter = BlobCounter::new();
//! counter.process_image(image.view()).unwrap();
//! assert_eq!(counter.objects_count(), 2);
//! ```
//!
//! ## Extracting blobs
//!
//! ```
//! use blobcount_core::{PixelFormat, RawImage};
//! use blobcount_region::{BlobCounter, ObjectsOrder};
//!
//! let mut image = RawImage::new(6, 4, PixelFormat::Rgb24).unwrap();
//! image.set_pixel(0, 0, &[9, 0, 0]).unwrap();
//! image.set_pixel(4, 2, &[0, 9, 0]).unwrap();
//! image.set_pixel(5, 3, &[0, 0, 9]).unwrap();
//!
//! let mut counter = BlobCounter::new().with_objects_order(ObjectsOrder::Size);
//! counter.process_image(image.view()).unwrap();
//!
//! let blobs = counter.objects(image.view(), false).unwrap();
//! let biggest = blobs[0].image().unwrap();
//! assert_eq!((biggest.width(), biggest.height()), (2, 2));
//! assert_eq!(biggest.get_pixel(1, 1), Some(&[0u8, 0, 9][..]));
//! ```

pub mod blob;
pub mod conncomp;
pub mod counter;
pub mod error;
pub mod extract;
pub mod filter;
pub mod label;
pub mod seedfill;
pub mod select;
pub mod sort;

// Re-export core types
pub use blobcount_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export labeling types
pub use conncomp::{ScanlineLabeler, label_scanline};
pub use label::{LabelMap, ObjectLabeler};
pub use seedfill::{FloodFillLabeler, label_floodfill};

// Re-export engine types
pub use blob::Blob;
pub use counter::{BlobCounter, RecursiveBlobCounter};
pub use extract::{extract_blob, extracted_format};
pub use filter::SizeFilter;
pub use sort::ObjectsOrder;

// Re-export filters
pub use select::{
    BlobsFiltering, ConnectedComponentsLabeling, DEFAULT_COLOR_TABLE, ExtractBiggestBlob,
};
