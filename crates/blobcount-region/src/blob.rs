//! Blob value type

use blobcount_core::{RawImage, Rect};

/// A labeled object found by [`crate::BlobCounter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    id: u32,
    rect: Rect,
    image: Option<RawImage>,
    original_size: bool,
}

impl Blob {
    /// Create a blob with no extracted image.
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            image: None,
            original_size: false,
        }
    }

    /// Label of the blob in the processed image (1-based).
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Bounding rectangle in source image coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The extracted image, if any.
    pub fn image(&self) -> Option<&RawImage> {
        self.image.as_ref()
    }

    /// Take ownership of the extracted image.
    pub fn take_image(&mut self) -> Option<RawImage> {
        self.image.take()
    }

    /// `true` if the image has the size of the source image rather than
    /// the size of the blob rectangle.
    #[inline]
    pub fn original_size(&self) -> bool {
        self.original_size
    }

    pub(crate) fn set_image(&mut self, image: RawImage, original_size: bool) {
        self.image = Some(image);
        self.original_size = original_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobcount_core::PixelFormat;

    #[test]
    fn test_take_image() {
        let mut blob = Blob::new(1, Rect::new_unchecked(0, 0, 2, 2));
        assert!(blob.take_image().is_none());

        let image = RawImage::new(2, 2, PixelFormat::Gray8).unwrap();
        blob.set_image(image.clone(), true);
        assert!(blob.original_size());
        assert_eq!(blob.take_image(), Some(image));
        assert!(blob.image().is_none());
    }
}
