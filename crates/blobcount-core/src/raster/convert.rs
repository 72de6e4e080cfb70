//! Conversion to and from the `image` crate
//!
//! Enabled by the `image` feature (on by default). Buffers from the `image`
//! crate are tightly packed; converting into a [`RawImage`] re-pads every
//! row to a 4-byte boundary, and converting back strips the padding.

use super::{PixelFormat, RawImage};
use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, Rgba, RgbaImage};

impl RawImage {
    /// Copy a tightly packed buffer into a new padded image.
    fn from_packed(width: u32, height: u32, format: PixelFormat, packed: &[u8]) -> Result<Self> {
        let mut image = RawImage::new(width, height, format)?;
        let row_bytes = image.row_bytes();
        for (y, src) in packed.chunks_exact(row_bytes).take(height as usize).enumerate() {
            image.row_mut(y as u32).copy_from_slice(src);
        }
        Ok(image)
    }

    /// Pixel bytes without row padding.
    fn to_packed(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.row_bytes() * self.height as usize);
        for row in self.view().rows() {
            packed.extend_from_slice(row);
        }
        packed
    }

    /// Convert from a [`DynamicImage`].
    ///
    /// 16-bit samples are stored little-endian.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for color types without a
    /// [`PixelFormat`] counterpart (gray+alpha, 16-bit RGB, float).
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageLuma8(buf) => {
                Self::from_packed(buf.width(), buf.height(), PixelFormat::Gray8, buf.as_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                Self::from_packed(buf.width(), buf.height(), PixelFormat::Rgb24, buf.as_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                Self::from_packed(buf.width(), buf.height(), PixelFormat::Rgba32, buf.as_raw())
            }
            DynamicImage::ImageLuma16(buf) => {
                let bytes: Vec<u8> = buf.as_raw().iter().flat_map(|s| s.to_le_bytes()).collect();
                Self::from_packed(buf.width(), buf.height(), PixelFormat::Gray16, &bytes)
            }
            DynamicImage::ImageRgba16(buf) => {
                let bytes: Vec<u8> = buf.as_raw().iter().flat_map(|s| s.to_le_bytes()).collect();
                Self::from_packed(buf.width(), buf.height(), PixelFormat::Rgba64, &bytes)
            }
            other => Err(Error::UnsupportedFormat(format!("{:?}", other.color()))),
        }
    }

    /// Convert into a [`DynamicImage`].
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let packed = self.to_packed();
        let mismatch = || Error::InvalidParameter("packed buffer does not match size".to_string());

        let image = match self.format {
            PixelFormat::Gray8 => {
                DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, packed).ok_or_else(mismatch)?)
            }
            PixelFormat::Rgb24 => {
                DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, packed).ok_or_else(mismatch)?)
            }
            PixelFormat::Rgba32 => {
                DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, packed).ok_or_else(mismatch)?)
            }
            PixelFormat::Gray16 => {
                let samples = to_u16_samples(&packed);
                DynamicImage::ImageLuma16(
                    ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, samples)
                        .ok_or_else(mismatch)?,
                )
            }
            PixelFormat::Rgba64 => {
                let samples = to_u16_samples(&packed);
                DynamicImage::ImageRgba16(
                    ImageBuffer::<Rgba<u16>, Vec<u16>>::from_raw(w, h, samples)
                        .ok_or_else(mismatch)?,
                )
            }
        };
        Ok(image)
    }
}

fn to_u16_samples(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

impl TryFrom<&GrayImage> for RawImage {
    type Error = Error;

    fn try_from(buf: &GrayImage) -> Result<Self> {
        RawImage::from_packed(buf.width(), buf.height(), PixelFormat::Gray8, buf.as_raw())
    }
}

impl TryFrom<&RgbImage> for RawImage {
    type Error = Error;

    fn try_from(buf: &RgbImage) -> Result<Self> {
        RawImage::from_packed(buf.width(), buf.height(), PixelFormat::Rgb24, buf.as_raw())
    }
}

impl TryFrom<&RgbaImage> for RawImage {
    type Error = Error;

    fn try_from(buf: &RgbaImage) -> Result<Self> {
        RawImage::from_packed(buf.width(), buf.height(), PixelFormat::Rgba32, buf.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_gray_from_image_crate() {
        let mut buf = GrayImage::new(3, 2);
        buf.put_pixel(2, 1, Luma([200]));
        let raw = RawImage::try_from(&buf).unwrap();
        assert_eq!(raw.format(), PixelFormat::Gray8);
        assert_eq!(raw.stride(), 4);
        assert_eq!(raw.get_pixel(2, 1), Some(&[200u8][..]));
    }

    #[test]
    fn test_rgb_to_dynamic_strips_padding() {
        let mut raw = RawImage::new(3, 2, PixelFormat::Rgb24).unwrap();
        raw.set_pixel(1, 1, &[1, 2, 3]).unwrap();
        let dynamic = raw.to_dynamic().unwrap();
        let rgb = dynamic.as_rgb8().unwrap();
        assert_eq!(rgb.as_raw().len(), 18);
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([1, 2, 3]));
    }

    #[test]
    fn test_gray16_little_endian() {
        let buf = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(2, 1, vec![0x0102, 0]).unwrap();
        let raw = RawImage::from_dynamic(&DynamicImage::ImageLuma16(buf)).unwrap();
        assert_eq!(raw.format(), PixelFormat::Gray16);
        assert_eq!(raw.get_pixel(0, 0), Some(&[0x02u8, 0x01][..]));
        let back = raw.to_dynamic().unwrap();
        assert_eq!(back.as_luma16().unwrap().get_pixel(0, 0), &Luma([0x0102]));
    }

    #[test]
    fn test_unsupported_color_type() {
        let dynamic = DynamicImage::new_luma_a8(2, 2);
        assert!(matches!(
            RawImage::from_dynamic(&dynamic),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
