//! Blob filter regression test
//!
//! Covers BlobsFiltering, ConnectedComponentsLabeling and
//! ExtractBiggestBlob, and sharing one counter between threads.

use std::sync::{Arc, Mutex};
use std::thread;

use blobcount_core::PixelFormat;
use blobcount_region::{
    BlobCounter, BlobsFiltering, ConnectedComponentsLabeling, DEFAULT_COLOR_TABLE,
    ExtractBiggestBlob, RegionError, SizeFilter,
};
use blobcount_test::{RegParams, gray_from_mask, image_from_ascii, random_mask};

const ART: [&str; 7] = [
    "#.......##", //
    "........##", //
    "..####....", //
    "..####..#.", //
    "..####..#.", //
    "........#.", //
    "#.........", //
];

#[test]
fn blobs_filtering_reg() {
    let mut rp = RegParams::new("blobs_filtering");

    for format in [PixelFormat::Gray8, PixelFormat::Rgb24, PixelFormat::Rgba32] {
        let mut pixs = image_from_ascii(&ART, format).unwrap();
        let kept = BlobsFiltering::new(2, 2, 100, 100)
            .apply_in_place(&mut pixs)
            .unwrap();
        eprintln!("  {}: {} kept", format, kept);
        // the 2x2 corner block and the 4x3 block
        rp.compare_values(2.0, kept as f64, 0.0);

        let expected = image_from_ascii(
            &[
                "........##", //
                "........##", //
                "..####....", //
                "..####....", //
                "..####....", //
                "..........", //
                "..........", //
            ],
            format,
        )
        .unwrap();
        rp.compare_images(&expected, &pixs);
    }

    // --- Coupled filter keeps the 1x3 column ---
    let mut pixs = image_from_ascii(&ART, PixelFormat::Gray8).unwrap();
    let filter = SizeFilter::enabled().with_min_size(2, 2).with_coupled(true);
    let kept = BlobsFiltering::with_filter(filter.with_enabled(false))
        .apply_in_place(&mut pixs)
        .unwrap();
    rp.compare_values(3.0, kept as f64, 0.0);

    // --- Unsupported format ---
    let mut wide = blobcount_core::RawImage::new(4, 4, PixelFormat::Gray16).unwrap();
    let err = BlobsFiltering::default().apply_in_place(&mut wide);
    rp.compare_values(
        1.0,
        matches!(err, Err(RegionError::UnsupportedFormat { .. })) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "blobs_filtering regression test failed");
}

#[test]
fn components_labeling_reg() {
    let mut rp = RegParams::new("components_labeling");

    let pixs = image_from_ascii(&ART, PixelFormat::Rgba32).unwrap();
    let (colored, count) = ConnectedComponentsLabeling::new()
        .apply(pixs.view())
        .unwrap();
    rp.compare_values(5.0, count as f64, 0.0);
    rp.compare_values(
        1.0,
        (colored.format() == PixelFormat::Rgb24) as u8 as f64,
        0.0,
    );

    // ids follow raster order of the first pixel
    let expect = [
        ((0, 0), DEFAULT_COLOR_TABLE[0]),
        ((8, 0), DEFAULT_COLOR_TABLE[1]),
        ((3, 3), DEFAULT_COLOR_TABLE[2]),
        ((8, 5), DEFAULT_COLOR_TABLE[3]),
        ((0, 6), DEFAULT_COLOR_TABLE[4]),
        ((1, 0), [0, 0, 0]),
    ];
    for ((x, y), rgb) in expect {
        let px = colored.get_pixel(x, y).unwrap();
        rp.compare_values(1.0, (px == rgb) as u8 as f64, 0.0);
    }

    // --- Palette wraps around ---
    let mask = random_mask(64, 64, 0.3, 5);
    let pixs = gray_from_mask(64, 64, &mask).unwrap();
    let table = vec![[10, 20, 30], [40, 50, 60], [70, 80, 90]];
    let labeling = ConnectedComponentsLabeling::new().with_color_table(table.clone());
    let (colored, count) = labeling.apply(pixs.view()).unwrap();
    eprintln!("  random: {} objects", count);
    rp.compare_values(1.0, (count > 3) as u8 as f64, 0.0);

    let mut counter = BlobCounter::new();
    counter.process_image(pixs.view()).unwrap();
    let labels = counter.object_labels().unwrap();
    let mut ok = true;
    for y in 0..64u32 {
        for x in 0..64u32 {
            let label = labels[(y * 64 + x) as usize];
            let expected = if label == 0 {
                [0, 0, 0]
            } else {
                table[(label as usize - 1) % table.len()]
            };
            ok &= colored.get_pixel(x, y).unwrap() == expected;
        }
    }
    rp.compare_values(1.0, ok as u8 as f64, 0.0);

    // --- With a filter ---
    let pixs = image_from_ascii(&ART, PixelFormat::Gray8).unwrap();
    let (_, count) = ConnectedComponentsLabeling::new()
        .with_filter(SizeFilter::enabled().with_min_size(2, 2))
        .apply(pixs.view())
        .unwrap();
    rp.compare_values(2.0, count as f64, 0.0);

    // --- Empty palette ---
    let err = ConnectedComponentsLabeling::new()
        .with_color_table(Vec::new())
        .apply(pixs.view());
    rp.compare_values(
        1.0,
        matches!(err, Err(RegionError::InvalidParameters(_))) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "components_labeling regression test failed");
}

#[test]
fn biggest_blob_reg() {
    let mut rp = RegParams::new("biggest_blob");

    let pixs = image_from_ascii(&ART, PixelFormat::Gray8).unwrap();
    let blob = ExtractBiggestBlob::new()
        .apply(pixs.view(), None)
        .unwrap()
        .unwrap();
    eprintln!("  biggest: id {} {:?}", blob.id(), blob.rect());
    rp.compare_values(3.0, blob.id() as f64, 0.0);
    rp.compare_values(12.0, blob.rect().area() as f64, 0.0);
    let image = blob.image().unwrap();
    rp.compare_values(4.0, image.width() as f64, 0.0);
    rp.compare_values(3.0, image.height() as f64, 0.0);
    rp.compare_values(1.0, image.row(1).iter().all(|&v| v == 255) as u8 as f64, 0.0);

    // --- Pixels from an original color image ---
    let original = image_from_ascii(
        &[
            "..........", //
            "..........", //
            "..rgbr....", //
            "..gggg....", //
            "..bbbb....", //
            "..........", //
            "..........", //
        ],
        PixelFormat::Rgba32,
    )
    .unwrap();
    let blob = ExtractBiggestBlob::new()
        .apply(pixs.view(), Some(original.view()))
        .unwrap()
        .unwrap();
    let image = blob.image().unwrap();
    rp.compare_values(
        1.0,
        (image.format() == PixelFormat::Rgb24) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        (image.get_pixel(2, 0) == Some(&[0u8, 0, 200][..])) as u8 as f64,
        0.0,
    );

    // --- Ties go to the first blob ---
    let pixs = image_from_ascii(&["##..##", "##..##"], PixelFormat::Gray8).unwrap();
    let blob = ExtractBiggestBlob::new()
        .apply(pixs.view(), None)
        .unwrap()
        .unwrap();
    rp.compare_values(1.0, blob.id() as f64, 0.0);

    // --- No blobs ---
    let empty = image_from_ascii(&["...", "..."], PixelFormat::Gray8).unwrap();
    let none = ExtractBiggestBlob::new().apply(empty.view(), None).unwrap();
    rp.compare_values(1.0, none.is_none() as u8 as f64, 0.0);

    // --- Original of the wrong size or format ---
    let small = image_from_ascii(&["##", "##"], PixelFormat::Rgb24).unwrap();
    let err = ExtractBiggestBlob::new().apply(pixs.view(), Some(small.view()));
    rp.compare_values(
        1.0,
        matches!(err, Err(RegionError::InvalidGeometry(_))) as u8 as f64,
        0.0,
    );
    let deep = blobcount_core::RawImage::new(6, 2, PixelFormat::Rgba64).unwrap();
    let err = ExtractBiggestBlob::new().apply(pixs.view(), Some(deep.view()));
    rp.compare_values(
        1.0,
        matches!(err, Err(RegionError::UnsupportedFormat { .. })) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "biggest_blob regression test failed");
}

#[test]
fn shared_counter_reg() {
    let mut rp = RegParams::new("shared_counter");

    let counter = Arc::new(Mutex::new(BlobCounter::new()));
    let mut handles = Vec::new();
    for seed in 0..4u64 {
        let counter = Arc::clone(&counter);
        handles.push(thread::spawn(move || {
            let mask = random_mask(48, 48, 0.5, seed);
            let pixs = gray_from_mask(48, 48, &mask).unwrap();
            let (_, expected) = blobcount_test::reference_labels(48, 48, &mask);

            let mut guard = counter.lock().unwrap();
            guard.process_image(pixs.view()).unwrap();
            let rects = guard.objects_rectangles().unwrap();
            (expected, guard.objects_count(), rects.len() as u32)
        }));
    }

    for handle in handles {
        let (expected, count, rects) = handle.join().unwrap();
        rp.compare_values(expected as f64, count as f64, 0.0);
        rp.compare_values(expected as f64, rects as f64, 0.0);
    }

    // filters are plain configuration and run on any thread
    let filtering = BlobsFiltering::new(3, 3, 50, 50);
    let results: Vec<u32> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let mask = random_mask(32, 32, 0.5, seed);
                let mut pixs = gray_from_mask(32, 32, &mask).unwrap();
                filtering.apply_in_place(&mut pixs).unwrap()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();
    for (seed, kept) in results.into_iter().enumerate() {
        let mask = random_mask(32, 32, 0.5, seed as u64);
        let mut pixs = gray_from_mask(32, 32, &mask).unwrap();
        let again = filtering.apply_in_place(&mut pixs).unwrap();
        rp.compare_values(again as f64, kept as f64, 0.0);
    }

    assert!(rp.cleanup(), "shared_counter regression test failed");
}
