//! Per-blob pixel extraction
//!
//! Copies the pixels of one labeled object out of the source image. Only
//! pixels whose label equals the blob id are copied; everything else in the
//! destination stays zero, so neighboring blobs inside the same bounding box
//! never bleed into the result.

use crate::error::{RegionError, RegionResult};
use crate::label::{LabelMap, check_binary_format};
use blobcount_core::{ImageView, PixelFormat, RawImage, Rect};
use tracing::trace;

/// Pixel format of an extracted blob image.
///
/// Color sources lose their alpha channel.
pub fn extracted_format(source: PixelFormat) -> PixelFormat {
    match source {
        PixelFormat::Gray8 => PixelFormat::Gray8,
        _ => PixelFormat::Rgb24,
    }
}

/// Copy blob `id` out of `source`.
///
/// # Arguments
///
/// * `source` - Image with the same dimensions as `map`
/// * `map` - Label map the blob belongs to
/// * `id` - Blob label, `1..=map.objects_count()`
/// * `rect` - Bounding rectangle of the blob
/// * `original_size` - Produce an image of the source size instead of the
///   rectangle size
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedFormat`] for formats other than
/// gray8/rgb24/rgba32, [`RegionError::InvalidGeometry`] if `source` and
/// `map` differ in size or `rect` leaves the image, and
/// [`RegionError::InvalidParameters`] if `id` is not a label of `map`.
pub fn extract_blob(
    source: ImageView<'_>,
    map: &LabelMap,
    id: u32,
    rect: Rect,
    original_size: bool,
) -> RegionResult<RawImage> {
    check_binary_format(source.format(), "blob extraction")?;

    if source.width() != map.width() || source.height() != map.height() {
        return Err(RegionError::InvalidGeometry(format!(
            "source image is {}x{} but objects map is {}x{}",
            source.width(),
            source.height(),
            map.width(),
            map.height()
        )));
    }
    if id == 0 || id > map.objects_count() {
        return Err(RegionError::InvalidParameters(format!(
            "blob id {} is not in 1..={}",
            id,
            map.objects_count()
        )));
    }
    if rect.w <= 0
        || rect.h <= 0
        || rect.x < 0
        || rect.y < 0
        || rect.right() > map.width() as i32
        || rect.bottom() > map.height() as i32
    {
        return Err(RegionError::InvalidGeometry(format!(
            "blob rectangle {:?} is outside the {}x{} image",
            rect,
            map.width(),
            map.height()
        )));
    }

    let src_bpp = source.format().bytes_per_pixel();
    let dst_format = extracted_format(source.format());
    let dst_bpp = dst_format.bytes_per_pixel();

    let (dst_w, dst_h, dx, dy) = if original_size {
        (map.width(), map.height(), rect.x as usize, rect.y as usize)
    } else {
        (rect.w as u32, rect.h as u32, 0, 0)
    };
    let mut dst = RawImage::new(dst_w, dst_h, dst_format)?;

    let x0 = rect.x as usize;
    let x1 = rect.right() as usize;
    for (i, y) in (rect.y as u32..rect.bottom() as u32).enumerate() {
        let labels = &map.row(y)[x0..x1];
        let src = &source.row(y)[x0 * src_bpp..x1 * src_bpp];
        let dst_row = &mut dst.row_mut((dy + i) as u32)[dx * dst_bpp..(dx + labels.len()) * dst_bpp];

        for ((&label, s), d) in labels
            .iter()
            .zip(src.chunks_exact(src_bpp))
            .zip(dst_row.chunks_exact_mut(dst_bpp))
        {
            if label == id {
                d.copy_from_slice(&s[..dst_bpp]);
            }
        }
    }

    trace!(
        id,
        x = rect.x,
        y = rect.y,
        w = rect.w,
        h = rect.h,
        original_size,
        "extracted blob"
    );

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blob_map() -> LabelMap {
        #[rustfmt::skip]
        let labels = vec![
            1, 1, 0, 2,
            0, 1, 2, 2,
            0, 0, 0, 0,
        ];
        LabelMap::from_parts(4, 3, labels, 2).unwrap()
    }

    #[test]
    fn test_extract_masks_other_blobs() {
        let map = two_blob_map();
        let mut image = RawImage::new(4, 3, PixelFormat::Gray8).unwrap();
        image.fill(7);
        let rect = map.bounds()[0];
        let blob = extract_blob(image.view(), &map, 1, rect, false).unwrap();
        assert_eq!((blob.width(), blob.height()), (2, 2));
        assert_eq!(blob.row(0), &[7, 7]);
        assert_eq!(blob.row(1), &[0, 7]);
    }

    #[test]
    fn test_extract_original_size() {
        let map = two_blob_map();
        let mut image = RawImage::new(4, 3, PixelFormat::Gray8).unwrap();
        image.fill(7);
        let rect = map.bounds()[1];
        let blob = extract_blob(image.view(), &map, 2, rect, true).unwrap();
        assert_eq!((blob.width(), blob.height()), (4, 3));
        assert_eq!(blob.row(0), &[0, 0, 0, 7]);
        assert_eq!(blob.row(1), &[0, 0, 7, 7]);
        assert_eq!(blob.row(2), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_extract_drops_alpha() {
        let map = two_blob_map();
        let mut image = RawImage::new(4, 3, PixelFormat::Rgba32).unwrap();
        image.set_pixel(3, 0, &[1, 2, 3, 4]).unwrap();
        let rect = map.bounds()[1];
        let blob = extract_blob(image.view(), &map, 2, rect, false).unwrap();
        assert_eq!(blob.format(), PixelFormat::Rgb24);
        assert_eq!(blob.get_pixel(1, 0), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_extract_rejects_bad_input() {
        let map = two_blob_map();
        let image = RawImage::new(4, 3, PixelFormat::Gray8).unwrap();
        let rect = map.bounds()[0];
        assert!(matches!(
            extract_blob(image.view(), &map, 3, rect, false),
            Err(RegionError::InvalidParameters(_))
        ));
        assert!(matches!(
            extract_blob(image.view(), &map, 0, rect, false),
            Err(RegionError::InvalidParameters(_))
        ));

        let small = RawImage::new(3, 3, PixelFormat::Gray8).unwrap();
        assert!(matches!(
            extract_blob(small.view(), &map, 1, rect, false),
            Err(RegionError::InvalidGeometry(_))
        ));

        let wide = RawImage::new(4, 3, PixelFormat::Gray16).unwrap();
        assert!(matches!(
            extract_blob(wide.view(), &map, 1, rect, false),
            Err(RegionError::UnsupportedFormat { .. })
        ));
    }
}
