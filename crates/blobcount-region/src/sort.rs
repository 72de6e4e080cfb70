//! Blob ordering

use crate::blob::Blob;
use blobcount_core::Rect;

/// Order in which objects are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectsOrder {
    /// Label order (raster order of each blob's first pixel)
    #[default]
    None,
    /// Rectangle area, largest first
    Size,
    /// Top to bottom, then left to right
    YX,
    /// Left to right, then top to bottom
    XY,
}

impl ObjectsOrder {
    /// Sort rectangles in place. The sort is stable.
    pub fn sort_rects(self, rects: &mut [Rect]) {
        self.sort_by_rect(rects, |r| *r);
    }

    /// Sort blobs in place by their rectangles. The sort is stable.
    pub fn sort_blobs(self, blobs: &mut [Blob]) {
        self.sort_by_rect(blobs, |b| b.rect());
    }

    fn sort_by_rect<T>(self, items: &mut [T], rect: impl Fn(&T) -> Rect) {
        match self {
            ObjectsOrder::None => {}
            ObjectsOrder::Size => {
                items.sort_by(|a, b| rect(b).area().cmp(&rect(a).area()));
            }
            ObjectsOrder::YX => items.sort_by_key(|item| {
                let r = rect(item);
                (r.y, r.x)
            }),
            ObjectsOrder::XY => items.sort_by_key(|item| {
                let r = rect(item);
                (r.x, r.y)
            }),
        }
    }
}
