//! Raster container and borrowed view
//!
//! [`RawImage`] owns a single contiguous pixel buffer; [`ImageView`] borrows
//! one. Both describe the buffer with an explicit row stride so that
//! padded buffers coming from other libraries can be read without copying.
//!
//! # Pixel layout
//!
//! - Rows are stored top to bottom, `stride` bytes apart
//! - Pixels inside a row are packed, `bytes_per_pixel` bytes each
//! - Color channels are stored in R, G, B(, A) order
//! - Bytes between `width * bytes_per_pixel` and `stride` are padding and
//!   are never interpreted as pixels
//!
//! # Ownership model
//!
//! Labeling and extraction only ever read through an [`ImageView`]. Use
//! [`RawImage::view`] to borrow an owned image, or [`ImageView::new`] to wrap
//! a buffer owned elsewhere.

mod access;
#[cfg(feature = "image")]
pub mod convert;

use crate::error::{Error, Result};
use std::fmt;

/// Pixel format of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit grayscale (also used for binary images, 0 = background)
    Gray8,
    /// 16-bit grayscale, native little-endian samples
    Gray16,
    /// 24-bit RGB
    Rgb24,
    /// 32-bit RGBA
    Rgba32,
    /// 64-bit RGBA, 16 bits per channel
    Rgba64,
}

impl PixelFormat {
    /// Number of bytes used by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Gray16 => 2,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
            PixelFormat::Rgba64 => 8,
        }
    }

    /// Number of bits used by one pixel.
    pub fn bits(self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }

    /// Check if the format carries color channels.
    pub fn is_color(self) -> bool {
        matches!(
            self,
            PixelFormat::Rgb24 | PixelFormat::Rgba32 | PixelFormat::Rgba64
        )
    }

    /// Check if the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba32 | PixelFormat::Rgba64)
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Gray8 => "gray8",
            PixelFormat::Gray16 => "gray16",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Rgba32 => "rgba32",
            PixelFormat::Rgba64 => "rgba64",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `(width, height, stride, format)` describes `len` bytes.
fn validate_layout(
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    len: usize,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let row_bytes = width as usize * format.bytes_per_pixel();
    if stride < row_bytes {
        return Err(Error::InvalidStride { stride, row_bytes });
    }
    // The last row does not need its padding.
    let Some(required) = stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(row_bytes))
    else {
        return Err(Error::BufferTooSmall {
            required: usize::MAX,
            actual: len,
        });
    };
    if len < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }
    Ok(())
}

/// Owned raster with an explicit row stride.
///
/// # Examples
///
/// ```
/// use blobcount_core::{PixelFormat, RawImage};
///
/// let mut image = RawImage::new(5, 3, PixelFormat::Gray8).unwrap();
/// image.set_pixel(2, 1, &[255]).unwrap();
/// assert_eq!(image.stride(), 8); // rows start on a 4-byte boundary
/// assert_eq!(image.get_pixel(2, 1), Some(&[255u8][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RawImage {
    /// Create a zero-filled image.
    ///
    /// Rows are padded so every row starts on a 4-byte boundary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the buffer size does not fit in `usize`.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let stride = Self::compute_stride(width, format);
        let len = stride
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        let data = vec![0u8; len];
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, the stride is shorter
    /// than one row, or the buffer cannot hold all rows.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        validate_layout(width, height, stride, format, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Row length in bytes, padded to a 4-byte boundary.
    #[inline]
    pub fn compute_stride(width: u32, format: PixelFormat) -> usize {
        (width as usize * format.bytes_per_pixel()).div_ceil(4) * 4
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between row starts in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw bytes, including row padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Borrow the image as a read-only view.
    #[inline]
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: &self.data,
        }
    }
}

/// Read-only view over a raster owned elsewhere.
///
/// `ImageView` is `Copy`; pass it by value.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Wrap a borrowed buffer.
    ///
    /// # Errors
    ///
    /// Same validation as [`RawImage::from_raw`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blobcount_core::{ImageView, PixelFormat};
    ///
    /// // 3x2 grayscale image with one padding byte per row
    /// let bytes = [0, 9, 0, 0xEE, 9, 9, 0, 0xEE];
    /// let view = ImageView::new(3, 2, 4, PixelFormat::Gray8, &bytes).unwrap();
    /// assert_eq!(view.row(1), &[9, 9, 0]);
    /// ```
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: &'a [u8],
    ) -> Result<Self> {
        validate_layout(width, height, stride, format, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between row starts in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw bytes, including row padding.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> From<&'a RawImage> for ImageView<'a> {
    fn from(image: &'a RawImage) -> Self {
        image.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pads_rows() {
        let image = RawImage::new(5, 2, PixelFormat::Rgb24).unwrap();
        assert_eq!(image.stride(), 16);
        assert_eq!(image.data().len(), 32);
        assert!(image.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_zero_size() {
        assert!(matches!(
            RawImage::new(0, 4, PixelFormat::Gray8),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_raw_validation() {
        assert!(matches!(
            RawImage::from_raw(4, 2, 3, PixelFormat::Gray8, vec![0; 8]),
            Err(Error::InvalidStride { .. })
        ));
        assert!(matches!(
            RawImage::from_raw(4, 2, 6, PixelFormat::Gray8, vec![0; 9]),
            Err(Error::BufferTooSmall {
                required: 10,
                actual: 9
            })
        ));
        // Last row may omit its padding
        assert!(RawImage::from_raw(4, 2, 6, PixelFormat::Gray8, vec![0; 10]).is_ok());
        // Stride times height past usize::MAX
        assert!(matches!(
            RawImage::from_raw(1, 3, usize::MAX / 2 + 1, PixelFormat::Gray8, vec![0; 4]),
            Err(Error::BufferTooSmall { .. })
        ));
        assert!(matches!(
            ImageView::new(1, 3, usize::MAX / 2 + 1, PixelFormat::Gray8, &[0; 4]),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_new_size_overflow() {
        assert!(matches!(
            RawImage::new(u32::MAX, u32::MAX, PixelFormat::Rgba64),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_format_properties() {
        assert_eq!(PixelFormat::Rgba32.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::Gray16.bits(), 16);
        assert!(PixelFormat::Rgb24.is_color());
        assert!(!PixelFormat::Gray8.is_color());
        assert!(PixelFormat::Rgba64.has_alpha());
        assert_eq!(PixelFormat::Rgb24.to_string(), "rgb24");
    }
}
