//! Seed fill labeling
//!
//! An alternate labeler that assigns object ids by flood filling from each
//! unlabeled foreground pixel in raster order. It produces exactly the same
//! label map as [`crate::ScanlineLabeler`], at the cost of a padded working
//! buffer, and only reads 8-bit grayscale images.

use crate::error::{RegionError, RegionResult};
use crate::label::{LabelMap, ObjectLabeler};
use blobcount_core::{ImageView, PixelFormat};
use tracing::debug;

/// Cell value for the border and for background pixels.
const BLOCKED: i32 = -1;
/// Cell value for foreground pixels not yet reached by a fill.
const UNLABELED: i32 = 0;

/// Flood fill labeler for 8-bit grayscale images.
///
/// # Examples
///
/// ```
/// use blobcount_core::{PixelFormat, RawImage};
/// use blobcount_region::{FloodFillLabeler, ObjectLabeler};
///
/// let mut image = RawImage::new(3, 3, PixelFormat::Gray8).unwrap();
/// image.set_pixel(0, 2, &[1]).unwrap();
/// image.set_pixel(2, 0, &[1]).unwrap();
///
/// let map = FloodFillLabeler.build_objects_map(image.view()).unwrap();
/// assert_eq!(map.objects_count(), 2);
/// assert_eq!(map.get(2, 0), Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloodFillLabeler;

impl ObjectLabeler for FloodFillLabeler {
    fn build_objects_map(&self, image: ImageView<'_>) -> RegionResult<LabelMap> {
        label_floodfill(image)
    }

    fn name(&self) -> &'static str {
        "floodfill"
    }
}

/// Label 8-connected foreground regions by flood filling.
///
/// The working buffer is `(width + 2) * (height + 2)` cells with a blocked
/// border, so neighbor visits never leave the buffer. Fills are driven by an
/// explicit stack.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedFormat`] unless `image` is
/// [`PixelFormat::Gray8`].
pub fn label_floodfill(image: ImageView<'_>) -> RegionResult<LabelMap> {
    if image.format() != PixelFormat::Gray8 {
        return Err(RegionError::UnsupportedFormat {
            operation: "flood fill labeling",
            format: image.format(),
        });
    }

    let w = image.width() as usize;
    let h = image.height() as usize;
    let pw = w + 2;

    let mut cells = vec![BLOCKED; pw * (h + 2)];
    for (y, row) in image.rows().enumerate() {
        let base = (y + 1) * pw + 1;
        for (cell, &v) in cells[base..base + w].iter_mut().zip(row) {
            if v != 0 {
                *cell = UNLABELED;
            }
        }
    }

    let offsets: [isize; 8] = [
        -(pw as isize) - 1,
        -(pw as isize),
        -(pw as isize) + 1,
        -1,
        1,
        pw as isize - 1,
        pw as isize,
        pw as isize + 1,
    ];

    let mut objects_count = 0i32;
    let mut stack: Vec<usize> = Vec::new();
    let mut max_stack = 0usize;

    for y in 0..h {
        let base = (y + 1) * pw + 1;
        for seed in base..base + w {
            if cells[seed] != UNLABELED {
                continue;
            }
            objects_count += 1;
            cells[seed] = objects_count;
            stack.push(seed);

            while let Some(p) = stack.pop() {
                for &off in &offsets {
                    // Border cells keep p + off inside the buffer.
                    let q = p.wrapping_add_signed(off);
                    if cells[q] == UNLABELED {
                        cells[q] = objects_count;
                        stack.push(q);
                    }
                }
                max_stack = max_stack.max(stack.len());
            }
        }
    }

    let mut labels = Vec::with_capacity(w * h);
    for y in 0..h {
        let base = (y + 1) * pw + 1;
        labels.extend(cells[base..base + w].iter().map(|&c| c.max(0) as u32));
    }

    debug!(
        labeler = "floodfill",
        width = w,
        height = h,
        objects = objects_count,
        max_stack,
        "labeled image"
    );

    LabelMap::from_parts(w as u32, h as u32, labels, objects_count as u32)
}
