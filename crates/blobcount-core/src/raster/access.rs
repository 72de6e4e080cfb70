//! Pixel access functions
//!
//! Bounds-checked row and pixel accessors. A row slice always has exactly
//! `width * bytes_per_pixel` bytes, so stride padding never leaks into
//! pixel loops.

use super::{ImageView, RawImage};
use crate::error::{Error, Result};

impl<'a> ImageView<'a> {
    /// Bytes of one row without padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Get row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(y < self.height, "row {} out of bounds ({})", y, self.height);
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Iterate over all rows, top to bottom.
    pub fn rows(self) -> impl Iterator<Item = &'a [u8]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Get the bytes of pixel `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel(x, y))
    }

    /// Get the bytes of pixel `(x, y)` without returning an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &'a [u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = x as usize * bpp;
        &self.row(y)[start..start + bpp]
    }
}

impl RawImage {
    /// Bytes of one row without padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Get row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds ({})", y, self.height);
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Get row `y` for writing.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {} out of bounds ({})", y, self.height);
        let start = y as usize * self.stride;
        let row_bytes = self.row_bytes();
        &mut self.data[start..start + row_bytes]
    }

    /// Get the bytes of pixel `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        self.view().get_pixel(x, y)
    }

    /// Get the bytes of pixel `(x, y)` for writing.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = x as usize * bpp;
        Some(&mut self.row_mut(y)[start..start + bpp])
    }

    /// Overwrite pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::PixelSizeMismatch`] if `value` is not exactly one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        let expected = self.format.bytes_per_pixel();
        if value.len() != expected {
            return Err(Error::PixelSizeMismatch {
                expected,
                actual: value.len(),
            });
        }
        let (width, height) = (self.width, self.height);
        let pixel = self.pixel_mut(x, y).ok_or(Error::IndexOutOfBounds {
            x,
            y,
            width,
            height,
        })?;
        pixel.copy_from_slice(value);
        Ok(())
    }

    /// Set every byte of every row (padding included) to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }
}
