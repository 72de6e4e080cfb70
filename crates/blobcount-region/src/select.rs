//! Image filters built on blob counting
//!
//! Each filter runs its own [`BlobCounter`] per call, so filter values hold
//! configuration only and can be shared freely between threads.

use crate::blob::Blob;
use crate::counter::BlobCounter;
use crate::error::{RegionError, RegionResult};
use crate::filter::SizeFilter;
use crate::label::check_binary_format;
use blobcount_core::channel::ALPHA;
use blobcount_core::{ImageView, PixelFormat, RawImage};
use tracing::debug;

/// Remove blobs outside the configured size limits, in place.
///
/// Pixels of removed blobs have their color bytes set to zero; alpha is
/// left untouched.
///
/// # Examples
///
/// ```
/// use blobcount_core::{PixelFormat, RawImage};
/// use blobcount_region::BlobsFiltering;
///
/// let mut image = RawImage::new(6, 6, PixelFormat::Gray8).unwrap();
/// image.set_pixel(0, 0, &[255]).unwrap();
/// for y in 2..5 {
///     for x in 2..5 {
///         image.set_pixel(x, y, &[255]).unwrap();
///     }
/// }
///
/// let kept = BlobsFiltering::new(2, 2, 10, 10).apply_in_place(&mut image).unwrap();
/// assert_eq!(kept, 1);
/// assert_eq!(image.get_pixel(0, 0), Some(&[0u8][..]));
/// assert_eq!(image.get_pixel(3, 3), Some(&[255u8][..]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobsFiltering {
    filter: SizeFilter,
}

impl Default for BlobsFiltering {
    fn default() -> Self {
        Self {
            filter: SizeFilter::enabled(),
        }
    }
}

impl BlobsFiltering {
    /// Keep blobs whose size is within the given limits (uncoupled).
    pub fn new(min_width: i32, min_height: i32, max_width: i32, max_height: i32) -> Self {
        Self::with_filter(
            SizeFilter::enabled()
                .with_min_size(min_width, min_height)
                .with_max_size(max_width, max_height),
        )
    }

    /// Use `filter` as the size limits. The filter is always enabled.
    pub fn with_filter(filter: SizeFilter) -> Self {
        Self {
            filter: filter.with_enabled(true),
        }
    }

    /// Size limits applied by the filter.
    pub fn filter(&self) -> &SizeFilter {
        &self.filter
    }

    /// Filter `image` in place and return the number of remaining blobs.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedFormat`] for formats other than
    /// gray8/rgb24/rgba32 and propagates labeling errors.
    pub fn apply_in_place(&self, image: &mut RawImage) -> RegionResult<u32> {
        let mut counter = BlobCounter::new().with_filter(self.filter);
        counter.process_image(image.view())?;

        let map = counter.label_map().ok_or(RegionError::NotProcessedYet)?;
        let bpp = image.format().bytes_per_pixel();
        let color_bytes = if image.format().has_alpha() { ALPHA } else { bpp };

        for y in 0..image.height() {
            let labels = map.row(y);
            let row = image.row_mut(y);
            for (&label, px) in labels.iter().zip(row.chunks_exact_mut(bpp)) {
                if label == 0 {
                    px[..color_bytes].fill(0);
                }
            }
        }

        debug!(remaining = map.objects_count(), "blobs filtering");
        Ok(map.objects_count())
    }
}

/// Default palette for [`ConnectedComponentsLabeling`].
pub const DEFAULT_COLOR_TABLE: [[u8; 3]; 32] = [
    [255, 0, 0],     // red
    [0, 128, 0],     // green
    [0, 0, 255],     // blue
    [255, 255, 0],   // yellow
    [238, 130, 238], // violet
    [165, 42, 42],   // brown
    [128, 128, 0],   // olive
    [0, 255, 255],   // cyan
    [255, 0, 255],   // magenta
    [255, 215, 0],   // gold
    [75, 0, 130],    // indigo
    [255, 255, 240], // ivory
    [255, 105, 180], // hot pink
    [139, 0, 0],     // dark red
    [0, 100, 0],     // dark green
    [0, 0, 139],     // dark blue
    [143, 188, 143], // dark sea green
    [128, 128, 128], // gray
    [189, 183, 107], // dark khaki
    [169, 169, 169], // dark gray
    [50, 205, 50],   // lime green
    [255, 99, 71],   // tomato
    [70, 130, 180],  // steel blue
    [135, 206, 235], // sky blue
    [192, 192, 192], // silver
    [250, 128, 114], // salmon
    [139, 69, 19],   // saddle brown
    [188, 143, 143], // rosy brown
    [176, 224, 230], // powder blue
    [221, 160, 221], // plum
    [255, 239, 213], // papaya whip
    [255, 165, 0],   // orange
];

/// Paint every blob with a color from a palette.
///
/// Blob `n` gets `color_table[(n - 1) % color_table.len()]`; background is
/// black. The output is always rgb24.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponentsLabeling {
    filter: Option<SizeFilter>,
    color_table: Vec<[u8; 3]>,
}

impl Default for ConnectedComponentsLabeling {
    fn default() -> Self {
        Self {
            filter: None,
            color_table: DEFAULT_COLOR_TABLE.to_vec(),
        }
    }
}

impl ConnectedComponentsLabeling {
    /// Create a labeling filter with the default palette and no size filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop blobs rejected by `filter` before coloring.
    pub fn with_filter(mut self, filter: SizeFilter) -> Self {
        self.filter = Some(filter.with_enabled(true));
        self
    }

    /// Replace the palette.
    pub fn with_color_table(mut self, color_table: Vec<[u8; 3]>) -> Self {
        self.color_table = color_table;
        self
    }

    /// Palette used to color blobs.
    pub fn color_table(&self) -> &[[u8; 3]] {
        &self.color_table
    }

    /// Color the blobs of `image`.
    ///
    /// Returns the colored image and the number of blobs.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if the color table is
    /// empty, and propagates labeling errors.
    pub fn apply(&self, image: ImageView<'_>) -> RegionResult<(RawImage, u32)> {
        if self.color_table.is_empty() {
            return Err(RegionError::InvalidParameters(
                "color table must not be empty".to_string(),
            ));
        }

        let mut counter = BlobCounter::new();
        if let Some(filter) = self.filter {
            counter.set_filter(filter);
        }
        counter.process_image(image)?;
        let map = counter.label_map().ok_or(RegionError::NotProcessedYet)?;

        let mut dst = RawImage::new(image.width(), image.height(), PixelFormat::Rgb24)?;
        let n = self.color_table.len();
        for y in 0..image.height() {
            let row = dst.row_mut(y);
            for (&label, px) in map.row(y).iter().zip(row.chunks_exact_mut(3)) {
                if label != 0 {
                    px.copy_from_slice(&self.color_table[(label as usize - 1) % n]);
                }
            }
        }

        debug!(objects = map.objects_count(), colors = n, "colored components");
        Ok((dst, map.objects_count()))
    }
}

/// Extract the blob with the largest bounding rectangle.
///
/// Ties go to the blob with the lower label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractBiggestBlob;

impl ExtractBiggestBlob {
    /// Create the filter.
    pub fn new() -> Self {
        Self
    }

    /// Find the biggest blob of `image` and extract its pixels.
    ///
    /// Pixels are copied from `original` when given, otherwise from `image`.
    /// The blob image has the size of its rectangle. Returns `None` if
    /// `image` has no blobs.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidGeometry`] if `original` differs in size
    /// from `image`, [`RegionError::UnsupportedFormat`] for unsupported
    /// formats of either image, and propagates labeling errors.
    pub fn apply(
        &self,
        image: ImageView<'_>,
        original: Option<ImageView<'_>>,
    ) -> RegionResult<Option<Blob>> {
        if let Some(original) = original {
            check_binary_format(original.format(), "biggest blob extraction")?;
            if original.width() != image.width() || original.height() != image.height() {
                return Err(RegionError::InvalidGeometry(format!(
                    "original image is {}x{} but source image is {}x{}",
                    original.width(),
                    original.height(),
                    image.width(),
                    image.height()
                )));
            }
        }

        let mut counter = BlobCounter::new();
        counter.process_image(image)?;

        let mut biggest: Option<Blob> = None;
        for blob in counter.objects_information()? {
            let better = biggest
                .as_ref()
                .is_none_or(|best| blob.rect().area() > best.rect().area());
            if better {
                biggest = Some(blob);
            }
        }

        let Some(mut blob) = biggest else {
            debug!("no blobs to extract");
            return Ok(None);
        };
        counter.extract_blobs_image(original.unwrap_or(image), &mut blob, false)?;

        debug!(id = blob.id(), area = blob.rect().area(), "extracted biggest blob");
        Ok(Some(blob))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blobs_filtering_keeps_alpha() {
        let mut image = RawImage::new(3, 1, PixelFormat::Rgba32).unwrap();
        image.set_pixel(0, 0, &[10, 20, 30, 40]).unwrap();
        let kept = BlobsFiltering::new(2, 1, 10, 10)
            .apply_in_place(&mut image)
            .unwrap();
        assert_eq!(kept, 0);
        assert_eq!(image.get_pixel(0, 0), Some(&[0u8, 0, 0, 40][..]));
    }

    #[test]
    fn test_labeling_colors_wrap() {
        let mut image = RawImage::new(5, 1, PixelFormat::Gray8).unwrap();
        image.set_pixel(0, 0, &[1]).unwrap();
        image.set_pixel(2, 0, &[1]).unwrap();
        image.set_pixel(4, 0, &[1]).unwrap();

        let labeling =
            ConnectedComponentsLabeling::new().with_color_table(vec![[1, 2, 3], [4, 5, 6]]);
        let (colored, count) = labeling.apply(image.view()).unwrap();
        assert_eq!(count, 3);
        assert_eq!(colored.row(0), &[1, 2, 3, 0, 0, 0, 4, 5, 6, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_labeling_empty_table() {
        let image = RawImage::new(2, 2, PixelFormat::Gray8).unwrap();
        let labeling = ConnectedComponentsLabeling::new().with_color_table(Vec::new());
        assert!(matches!(
            labeling.apply(image.view()),
            Err(RegionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_biggest_blob_none() {
        let image = RawImage::new(4, 4, PixelFormat::Gray8).unwrap();
        assert_eq!(ExtractBiggestBlob::new().apply(image.view(), None).unwrap(), None);
    }

    #[test]
    fn test_biggest_blob_original_size_mismatch() {
        let image = RawImage::new(4, 4, PixelFormat::Gray8).unwrap();
        let original = RawImage::new(4, 5, PixelFormat::Rgb24).unwrap();
        assert!(matches!(
            ExtractBiggestBlob::new().apply(image.view(), Some(original.view())),
            Err(RegionError::InvalidGeometry(_))
        ));
    }
}
