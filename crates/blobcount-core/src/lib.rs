//! blobcount-core - Basic data structures for blob counting
//!
//! This crate provides the data structures shared by the labeling and
//! extraction code:
//!
//! - [`RawImage`] / [`ImageView`] - Owned raster and borrowed view, both
//!   with an explicit row stride
//! - [`PixelFormat`] - Pixel layouts (8/16-bit gray, 24/32/64-bit color)
//! - [`Rect`] - Rectangle regions
//!
//! With the `image` feature (default), [`RawImage`] converts to and from the
//! `image` crate's buffers.

pub mod error;
pub mod raster;
pub mod rect;

pub use error::{Error, Result};
pub use raster::{ImageView, PixelFormat, RawImage};
pub use rect::Rect;

/// Channel indices for color pixels.
///
/// Color pixels are stored in R, G, B(, A) byte order.
pub mod channel {
    /// Red channel
    pub const RED: usize = 0;
    /// Green channel
    pub const GREEN: usize = 1;
    /// Blue channel
    pub const BLUE: usize = 2;
    /// Alpha channel (32-bit RGBA only)
    pub const ALPHA: usize = 3;
}
