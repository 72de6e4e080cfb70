//! Blob counting engine
//!
//! [`BlobCounter`] runs a labeler over an image, optionally drops objects
//! through a [`SizeFilter`], and answers queries about the remaining
//! objects: their bounding rectangles, their [`Blob`] descriptions and
//! their extracted pixels.
//!
//! Rectangles are computed once per processed image and cached. The cache
//! uses interior mutability, so a counter may be moved between threads but
//! not shared; wrap it in a `Mutex` to share it.

use std::cell::OnceCell;

use crate::blob::Blob;
use crate::conncomp::ScanlineLabeler;
use crate::error::{RegionError, RegionResult};
use crate::extract::extract_blob;
use crate::filter::SizeFilter;
use crate::label::{LabelMap, ObjectLabeler};
use crate::seedfill::FloodFillLabeler;
use crate::sort::ObjectsOrder;
use blobcount_core::{ImageView, Rect};
use tracing::debug;

/// Blob counter with a pluggable labeling algorithm.
///
/// # Examples
///
/// ```
/// use blobcount_core::{PixelFormat, RawImage};
/// use blobcount_region::{BlobCounter, ObjectsOrder, SizeFilter};
///
/// let mut image = RawImage::new(8, 8, PixelFormat::Gray8).unwrap();
/// for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2), (6, 6)] {
///     image.set_pixel(x, y, &[255]).unwrap();
/// }
///
/// let mut counter = BlobCounter::new();
/// counter.set_filter(SizeFilter::enabled().with_min_size(2, 2));
/// counter.set_objects_order(ObjectsOrder::Size);
/// counter.process_image(image.view()).unwrap();
///
/// assert_eq!(counter.objects_count(), 1);
/// let rects = counter.objects_rectangles().unwrap();
/// assert_eq!((rects[0].x, rects[0].y, rects[0].w, rects[0].h), (1, 1, 2, 2));
/// ```
#[derive(Debug)]
pub struct BlobCounter<L: ObjectLabeler = ScanlineLabeler> {
    labeler: L,
    filter: SizeFilter,
    order: ObjectsOrder,
    map: Option<LabelMap>,
    rects: OnceCell<Vec<Rect>>,
}

/// Blob counter driven by the flood fill labeler (grayscale input only).
pub type RecursiveBlobCounter = BlobCounter<FloodFillLabeler>;

impl BlobCounter {
    /// Create a counter with the scan-line labeler, no filtering and label
    /// order.
    pub fn new() -> Self {
        Self::with_labeler(ScanlineLabeler)
    }
}

impl<L: ObjectLabeler + Default> Default for BlobCounter<L> {
    fn default() -> Self {
        Self::with_labeler(L::default())
    }
}

impl<L: ObjectLabeler> BlobCounter<L> {
    /// Create a counter using `labeler`.
    pub fn with_labeler(labeler: L) -> Self {
        Self {
            labeler,
            filter: SizeFilter::default(),
            order: ObjectsOrder::None,
            map: None,
            rects: OnceCell::new(),
        }
    }

    /// Set the size filter (builder form).
    pub fn with_filter(mut self, filter: SizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the objects order (builder form).
    pub fn with_objects_order(mut self, order: ObjectsOrder) -> Self {
        self.order = order;
        self
    }

    /// Label `image` and, if the filter is enabled, drop filtered objects.
    ///
    /// Any previous result is discarded first, so after an error the counter
    /// reports [`RegionError::NotProcessedYet`].
    ///
    /// # Errors
    ///
    /// Propagates the labeler's errors.
    pub fn process_image(&mut self, image: ImageView<'_>) -> RegionResult<()> {
        self.map = None;
        self.rects = OnceCell::new();

        let mut map = self.labeler.build_objects_map(image)?;
        debug!(
            labeler = self.labeler.name(),
            objects = map.objects_count(),
            "processed image"
        );

        if self.filter.enabled {
            let kept = self.filter_objects(&mut map);
            self.rects = OnceCell::from(kept);
        }

        self.map = Some(map);
        Ok(())
    }

    /// Remove objects rejected by the filter and return the rectangles of
    /// the survivors in their new label order.
    fn filter_objects(&self, map: &mut LabelMap) -> Vec<Rect> {
        let bounds = map.bounds();
        let mut remap = vec![0u32; bounds.len() + 1];
        let mut kept = Vec::with_capacity(bounds.len());

        for (i, rect) in bounds.iter().enumerate() {
            if !self.filter.should_remove(rect.w, rect.h) {
                kept.push(*rect);
                remap[i + 1] = kept.len() as u32;
            }
        }

        debug!(
            before = bounds.len(),
            after = kept.len(),
            coupled = self.filter.coupled,
            "filtered objects"
        );

        map.relabel(&remap, kept.len() as u32);
        kept
    }

    fn processed_map(&self) -> RegionResult<&LabelMap> {
        self.map.as_ref().ok_or(RegionError::NotProcessedYet)
    }

    /// Cached rectangles in label order.
    fn cached_rects(&self) -> RegionResult<&[Rect]> {
        let map = self.processed_map()?;
        Ok(self.rects.get_or_init(|| map.bounds()).as_slice())
    }

    /// Bounding rectangles of all objects, in the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NotProcessedYet`] if no image has been
    /// processed.
    pub fn objects_rectangles(&self) -> RegionResult<Vec<Rect>> {
        let mut rects = self.cached_rects()?.to_vec();
        self.order.sort_rects(&mut rects);
        Ok(rects)
    }

    /// Id and rectangle of every object, without images, in the configured
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NotProcessedYet`] if no image has been
    /// processed.
    pub fn objects_information(&self) -> RegionResult<Vec<Blob>> {
        let mut blobs: Vec<Blob> = self
            .cached_rects()?
            .iter()
            .enumerate()
            .map(|(i, &rect)| Blob::new(i as u32 + 1, rect))
            .collect();
        self.order.sort_blobs(&mut blobs);
        Ok(blobs)
    }

    /// Every object with its extracted image, in the configured order.
    ///
    /// # Arguments
    ///
    /// * `image` - The processed image, or another image of the same size
    /// * `extract_in_original_size` - Give each blob image the size of
    ///   `image` instead of the size of its rectangle
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NotProcessedYet`] before processing, and the
    /// extraction errors of [`BlobCounter::extract_blobs_image`].
    pub fn objects(
        &self,
        image: ImageView<'_>,
        extract_in_original_size: bool,
    ) -> RegionResult<Vec<Blob>> {
        let mut blobs = self.objects_information()?;
        let map = self.processed_map()?;
        for blob in blobs.iter_mut() {
            let pixels =
                extract_blob(image, map, blob.id(), blob.rect(), extract_in_original_size)?;
            blob.set_image(pixels, extract_in_original_size);
        }
        debug!(count = blobs.len(), extract_in_original_size, "extracted objects");
        Ok(blobs)
    }

    /// Extract the pixels of `blob` from `image` into the blob.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NotProcessedYet`] before processing,
    /// [`RegionError::InvalidGeometry`] if `image` is not the size of the
    /// processed image, [`RegionError::InvalidParameters`] if the blob id is
    /// not a current label, and [`RegionError::UnsupportedFormat`] for
    /// unsupported pixel formats.
    pub fn extract_blobs_image(
        &self,
        image: ImageView<'_>,
        blob: &mut Blob,
        extract_in_original_size: bool,
    ) -> RegionResult<()> {
        let map = self.processed_map()?;
        let pixels = extract_blob(image, map, blob.id(), blob.rect(), extract_in_original_size)?;
        blob.set_image(pixels, extract_in_original_size);
        Ok(())
    }

    /// Number of objects found by the last `process_image` (0 before any).
    pub fn objects_count(&self) -> u32 {
        self.map.as_ref().map_or(0, LabelMap::objects_count)
    }

    /// Per-pixel labels of the last processed image.
    pub fn object_labels(&self) -> Option<&[u32]> {
        self.map.as_ref().map(LabelMap::labels)
    }

    /// Label map of the last processed image.
    pub fn label_map(&self) -> Option<&LabelMap> {
        self.map.as_ref()
    }

    /// Current size filter.
    pub fn filter(&self) -> &SizeFilter {
        &self.filter
    }

    /// Mutable access to the filter; takes effect on the next
    /// `process_image`.
    pub fn filter_mut(&mut self) -> &mut SizeFilter {
        &mut self.filter
    }

    /// Replace the size filter; takes effect on the next `process_image`.
    pub fn set_filter(&mut self, filter: SizeFilter) {
        self.filter = filter;
    }

    /// Order used by the object queries.
    pub fn objects_order(&self) -> ObjectsOrder {
        self.order
    }

    /// Change the order used by the object queries.
    pub fn set_objects_order(&mut self, order: ObjectsOrder) {
        self.order = order;
    }

    /// The labeling algorithm.
    pub fn labeler(&self) -> &L {
        &self.labeler
    }
}
