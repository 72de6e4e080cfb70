//! Label maps and the labeler interface
//!
//! A [`LabelMap`] holds one `u32` per pixel: `0` for background and
//! `1..=objects_count` for the blob the pixel belongs to. Labelers produce
//! dense maps (no unused label values), which lets the per-label tables
//! below be plain vectors indexed by label.

use crate::error::{RegionError, RegionResult};
use blobcount_core::channel::{BLUE, GREEN, RED};
use blobcount_core::{ImageView, PixelFormat, Rect};

/// Builds a [`LabelMap`] from a binary image.
///
/// Implementations must label 8-connected foreground regions with dense ids
/// `1..=objects_count`.
pub trait ObjectLabeler {
    /// Label every foreground region of `image`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedFormat`] if the labeler cannot read
    /// `image.format()`, or [`RegionError::InvalidGeometry`] if the image
    /// shape is degenerate for the algorithm.
    fn build_objects_map(&self, image: ImageView<'_>) -> RegionResult<LabelMap>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Per-pixel object labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    objects_count: u32,
}

impl LabelMap {
    /// Assemble a label map from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidGeometry`] if `labels.len()` is not
    /// `width * height`, and [`RegionError::InvalidParameters`] if a label
    /// exceeds `objects_count`.
    pub fn from_parts(
        width: u32,
        height: u32,
        labels: Vec<u32>,
        objects_count: u32,
    ) -> RegionResult<Self> {
        let expected = width as usize * height as usize;
        if labels.len() != expected {
            return Err(RegionError::InvalidGeometry(format!(
                "label map has {} entries, expected {}x{}",
                labels.len(),
                width,
                height
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| l > objects_count) {
            return Err(RegionError::InvalidParameters(format!(
                "label {} exceeds objects count {}",
                label, objects_count
            )));
        }
        Ok(Self {
            width,
            height,
            labels,
            objects_count,
        })
    }

    /// Width of the labeled image.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the labeled image.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of objects (the highest label).
    #[inline]
    pub fn objects_count(&self) -> u32 {
        self.objects_count
    }

    /// All labels, indexed `y * width + x`.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Consume the map, returning the label vector.
    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }

    /// Labels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.labels[start..start + self.width as usize]
    }

    /// Label at `(x, y)`, or `None` outside the map.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Bounding rectangle of every object.
    ///
    /// Element `i` belongs to label `i + 1`.
    pub fn bounds(&self) -> Vec<Rect> {
        let n = self.objects_count as usize;
        // (min_x, min_y, max_x, max_y) per label, slot 0 unused
        let mut extents = vec![(i32::MAX, i32::MAX, -1i32, -1i32); n + 1];

        for y in 0..self.height {
            for (x, &label) in self.row(y).iter().enumerate() {
                if label == 0 {
                    continue;
                }
                let e = &mut extents[label as usize];
                let (x, y) = (x as i32, y as i32);
                e.0 = e.0.min(x);
                e.1 = e.1.min(y);
                e.2 = e.2.max(x);
                e.3 = e.3.max(y);
            }
        }

        extents[1..]
            .iter()
            .map(|&(x1, y1, x2, y2)| {
                if x2 < 0 {
                    Rect::default()
                } else {
                    Rect::from_extents(x1, y1, x2, y2)
                }
            })
            .collect()
    }

    /// Rewrite every label through `remap` (indexed by old label).
    ///
    /// `remap[0]` must be `0`.
    pub(crate) fn relabel(&mut self, remap: &[u32], objects_count: u32) {
        for label in self.labels.iter_mut() {
            *label = remap[*label as usize];
        }
        self.objects_count = objects_count;
    }
}

/// Check that `format` can be read as a binary image.
pub(crate) fn check_binary_format(format: PixelFormat, operation: &'static str) -> RegionResult<()> {
    match format {
        PixelFormat::Gray8 | PixelFormat::Rgb24 | PixelFormat::Rgba32 => Ok(()),
        _ => Err(RegionError::UnsupportedFormat { operation, format }),
    }
}

/// Fill `out` with the foreground flag of every pixel in `row`.
///
/// A pixel is foreground if any of its color bytes is non-zero; alpha is
/// ignored. `format` must have passed [`check_binary_format`].
pub(crate) fn foreground_row(row: &[u8], format: PixelFormat, out: &mut [bool]) {
    match format {
        PixelFormat::Gray8 => {
            for (flag, &v) in out.iter_mut().zip(row) {
                *flag = v != 0;
            }
        }
        PixelFormat::Rgb24 => {
            for (flag, px) in out.iter_mut().zip(row.chunks_exact(3)) {
                *flag = (px[RED] | px[GREEN] | px[BLUE]) != 0;
            }
        }
        _ => {
            for (flag, px) in out.iter_mut().zip(row.chunks_exact(4)) {
                *flag = (px[RED] | px[GREEN] | px[BLUE]) != 0;
            }
        }
    }
}
