//! Synthetic rasters for regression tests
//!
//! Fixtures are drawn as ASCII art, one string per row:
//!
//! - `.` or space - background
//! - `#` - white foreground (255 in every channel)
//! - `r`, `g`, `b` - a single non-zero color channel (color images only)
//! - `1`..`9` - grayscale value `n * 25`
//!
//! Padded variants fill the stride padding with `0xFF` so that any scan
//! which reads past the end of a row sees phantom foreground.

use crate::error::{TestError, TestResult};
use blobcount_core::{PixelFormat, RawImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Byte written into stride padding by the padded builders.
pub const PADDING_BYTE: u8 = 0xFF;

/// Parse ASCII art into rows of RGB triples.
fn parse_rows(rows: &[&str]) -> TestResult<(u32, u32, Vec<[u8; 3]>)> {
    let height = rows.len();
    if height == 0 {
        return Err(TestError::Fixture {
            row: 0,
            message: "no rows".to_string(),
        });
    }
    let width = rows[0].chars().count();
    let mut pixels = Vec::with_capacity(width * height);

    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() != width {
            return Err(TestError::Fixture {
                row,
                message: format!("expected {} columns, got {}", width, line.chars().count()),
            });
        }
        for c in line.chars() {
            let rgb = match c {
                '.' | ' ' => [0, 0, 0],
                '#' => [255, 255, 255],
                'r' => [200, 0, 0],
                'g' => [0, 200, 0],
                'b' => [0, 0, 200],
                '1'..='9' => {
                    let v = (c as u8 - b'0') * 25;
                    [v, v, v]
                }
                other => {
                    return Err(TestError::Fixture {
                        row,
                        message: format!("unknown pixel character {:?}", other),
                    });
                }
            };
            pixels.push(rgb);
        }
    }

    Ok((width as u32, height as u32, pixels))
}

fn encode(rgb: [u8; 3], format: PixelFormat) -> TestResult<Vec<u8>> {
    match format {
        PixelFormat::Gray8 => Ok(vec![rgb[0].max(rgb[1]).max(rgb[2])]),
        PixelFormat::Rgb24 => Ok(rgb.to_vec()),
        // Opaque alpha everywhere, so background pixels carry a non-zero byte.
        PixelFormat::Rgba32 => Ok(vec![rgb[0], rgb[1], rgb[2], 255]),
        other => Err(TestError::Core(blobcount_core::Error::UnsupportedFormat(
            other.to_string(),
        ))),
    }
}

/// Build an image from ASCII art with the default (4-byte aligned) stride.
pub fn image_from_ascii(rows: &[&str], format: PixelFormat) -> TestResult<RawImage> {
    let (width, height, pixels) = parse_rows(rows)?;
    let mut image = RawImage::new(width, height, format)?;
    for (i, rgb) in pixels.into_iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        image.set_pixel(x, y, &encode(rgb, format)?)?;
    }
    Ok(image)
}

/// Build an 8-bit grayscale image from ASCII art.
pub fn gray_from_ascii(rows: &[&str]) -> TestResult<RawImage> {
    image_from_ascii(rows, PixelFormat::Gray8)
}

/// Build an image from ASCII art with `padding` extra bytes per row.
///
/// Padding bytes are set to [`PADDING_BYTE`].
pub fn padded_from_ascii(
    rows: &[&str],
    format: PixelFormat,
    padding: usize,
) -> TestResult<RawImage> {
    let (width, height, pixels) = parse_rows(rows)?;
    let row_bytes = width as usize * format.bytes_per_pixel();
    let stride = row_bytes + padding;
    let data = vec![PADDING_BYTE; stride * height as usize];
    let mut image = RawImage::from_raw(width, height, stride, format, data)?;
    for y in 0..height {
        image.row_mut(y).fill(0);
    }
    for (i, rgb) in pixels.into_iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        image.set_pixel(x, y, &encode(rgb, format)?)?;
    }
    Ok(image)
}

/// Random foreground mask with the given density.
///
/// Deterministic for a given seed.
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width as usize * height as usize)
        .map(|_| rng.random_bool(density))
        .collect()
}

/// Build an 8-bit image from a foreground mask (255 = foreground).
pub fn gray_from_mask(width: u32, height: u32, mask: &[bool]) -> TestResult<RawImage> {
    let expected = width as usize * height as usize;
    if mask.len() != expected {
        return Err(TestError::MaskSize {
            expected,
            actual: mask.len(),
        });
    }
    let mut image = RawImage::new(width, height, PixelFormat::Gray8)?;
    for y in 0..height {
        let src = &mask[(y * width) as usize..((y + 1) * width) as usize];
        for (dst, &on) in image.row_mut(y).iter_mut().zip(src) {
            *dst = if on { 255 } else { 0 };
        }
    }
    Ok(image)
}

/// Reference 8-connected labeling by breadth-first search.
///
/// Labels are assigned in raster order of each component's first pixel.
/// Returns the label map and the number of components.
pub fn reference_labels(width: u32, height: u32, mask: &[bool]) -> (Vec<u32>, u32) {
    let (w, h) = (width as i64, height as i64);
    let mut labels = vec![0u32; mask.len()];
    let mut count = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..mask.len() {
        if !mask[start] || labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            let (x, y) = (p as i64 % w, p as i64 / w);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let q = (ny * w + nx) as usize;
                    if mask[q] && labels[q] == 0 {
                        labels[q] = count;
                        queue.push_back(q);
                    }
                }
            }
        }
    }

    (labels, count)
}
