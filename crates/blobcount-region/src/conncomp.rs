//! Connected component labeling by scan-line union-find
//!
//! This module provides the primary labeler. It makes a single forward scan
//! over the image, assigning provisional labels from the already-visited
//! neighbors (left, upper-left, upper, upper-right) and recording label
//! equivalences in a union-find table whenever the upper-right neighbor
//! joins two provisional labels. A final pass maps every provisional label
//! to a dense object id.
//!
//! Object ids follow the raster order of each object's first pixel: the
//! object containing the top-most, left-most foreground pixel is `1`.

use crate::error::{RegionError, RegionResult};
use crate::label::{LabelMap, ObjectLabeler, check_binary_format, foreground_row};
use blobcount_core::ImageView;
use tracing::debug;

/// Scan-line union-find labeler for 8-connected blobs.
///
/// Accepts 8-bit grayscale, 24-bit RGB and 32-bit RGBA images. A pixel is
/// foreground if any of its color bytes is non-zero.
///
/// # Examples
///
/// ```
/// use blobcount_core::{PixelFormat, RawImage};
/// use blobcount_region::{ObjectLabeler, ScanlineLabeler};
///
/// let mut image = RawImage::new(4, 4, PixelFormat::Gray8).unwrap();
/// image.set_pixel(0, 0, &[255]).unwrap();
/// image.set_pixel(1, 1, &[255]).unwrap(); // diagonal touch
/// image.set_pixel(3, 3, &[255]).unwrap();
///
/// let map = ScanlineLabeler.build_objects_map(image.view()).unwrap();
/// assert_eq!(map.objects_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanlineLabeler;

impl ObjectLabeler for ScanlineLabeler {
    fn build_objects_map(&self, image: ImageView<'_>) -> RegionResult<LabelMap> {
        label_scanline(image)
    }

    fn name(&self) -> &'static str {
        "scanline"
    }
}

/// Union-find forest over provisional labels.
///
/// Slot 0 is the background and never takes part in a union. Every entry
/// satisfies `parent[i] <= i`, and after each union the whole table is
/// re-normalized so that every entry points directly at its root.
#[derive(Debug)]
struct EquivalenceTable {
    parent: Vec<u32>,
}

impl EquivalenceTable {
    fn with_capacity(capacity: usize) -> Self {
        let mut parent = Vec::with_capacity(capacity + 1);
        parent.push(0);
        Self { parent }
    }

    /// Number of provisional labels issued so far.
    fn len(&self) -> usize {
        self.parent.len() - 1
    }

    /// Issue a fresh provisional label.
    fn make_label(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            label = self.parent[label as usize];
        }
        label
    }

    /// Merge the sets of `a` and `b`; the smaller root survives.
    ///
    /// Returns `false` if they were already in one set.
    fn union(&mut self, a: u32, b: u32) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child as usize] = root;
        self.normalize();
        true
    }

    /// Point every entry at its final root.
    fn normalize(&mut self) {
        // Ascending order: parent[i] < i is already normalized when i is reached.
        for i in 1..self.parent.len() {
            let p = self.parent[i] as usize;
            self.parent[i] = self.parent[p];
        }
    }

    /// Map every provisional label to a dense object id.
    ///
    /// Returns the remap table (indexed by provisional label, `remap[0] == 0`)
    /// and the number of objects.
    fn dense_remap(&self) -> (Vec<u32>, u32) {
        let mut remap = vec![0u32; self.parent.len()];
        let mut objects_count = 0u32;

        for i in 1..self.parent.len() {
            if self.parent[i] as usize == i {
                objects_count += 1;
                remap[i] = objects_count;
            }
        }
        for i in 1..self.parent.len() {
            let root = self.parent[i] as usize;
            if root != i {
                remap[i] = remap[root];
            }
        }

        (remap, objects_count)
    }
}

/// Label 8-connected foreground regions with one augmented forward scan.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedFormat`] for formats other than
/// gray8/rgb24/rgba32 and [`RegionError::InvalidGeometry`] for images one
/// pixel wide.
pub fn label_scanline(image: ImageView<'_>) -> RegionResult<LabelMap> {
    let format = image.format();
    check_binary_format(format, "scan-line labeling")?;

    let w = image.width() as usize;
    let h = image.height() as usize;
    if w == 1 {
        return Err(RegionError::InvalidGeometry(
            "scan-line labeling needs an image at least 2 pixels wide".to_string(),
        ));
    }

    let mut labels = vec![0u32; w * h];
    let mut table = EquivalenceTable::with_capacity((w / 2 + 1) * (h / 2 + 1));
    let mut prev = vec![false; w];
    let mut curr = vec![false; w];
    let mut merges = 0usize;

    // First row: only the left neighbor exists.
    foreground_row(image.row(0), format, &mut curr);
    for x in 0..w {
        if curr[x] {
            labels[x] = if x > 0 && curr[x - 1] {
                labels[x - 1]
            } else {
                table.make_label()
            };
        }
    }

    for y in 1..h {
        std::mem::swap(&mut prev, &mut curr);
        foreground_row(image.row(y as u32), format, &mut curr);

        let (done, rest) = labels.split_at_mut(y * w);
        let above = &done[(y - 1) * w..];
        let row = &mut rest[..w];

        for x in 0..w {
            if !curr[x] {
                continue;
            }

            // Left, upper-left and upper are mutually adjacent, so any one
            // of them already carries the label of the other two.
            let mut label = if x > 0 && curr[x - 1] {
                row[x - 1]
            } else if x > 0 && prev[x - 1] {
                above[x - 1]
            } else if prev[x] {
                above[x]
            } else {
                0
            };

            // Upper-right may belong to a different provisional label.
            if x + 1 < w && prev[x + 1] {
                let upper_right = above[x + 1];
                if label == 0 {
                    label = upper_right;
                } else if table.union(label, upper_right) {
                    merges += 1;
                }
            }

            if label == 0 {
                label = table.make_label();
            }
            row[x] = label;
        }
    }

    let (remap, objects_count) = table.dense_remap();
    for label in labels.iter_mut() {
        *label = remap[*label as usize];
    }

    debug!(
        labeler = "scanline",
        width = w,
        height = h,
        provisional = table.len(),
        merges,
        objects = objects_count,
        "labeled image"
    );

    LabelMap::from_parts(w as u32, h as u32, labels, objects_count)
}
