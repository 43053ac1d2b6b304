use std::path::PathBuf;

use image::{Rgb, RgbImage};
use polybot::filter_dispatch::FilterKind;
use polybot::image_filters::{ImageFilters, LocalImageFilters};
use tempfile::TempDir;

/// Write a small two-tone test image and return its path
fn test_image(dir: &TempDir) -> PathBuf {
    let mut img = RgbImage::new(32, 16);
    for (x, _y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if x < 16 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        };
    }
    let path = dir.path().join("sample.png");
    img.save(&path).expect("failed to write test image");
    path
}

#[test]
fn test_every_filter_produces_a_distinct_output_file() {
    let dir = TempDir::new().unwrap();
    let input = test_image(&dir);
    let filters = LocalImageFilters::new();

    let mut outputs = Vec::new();
    for kind in FilterKind::ALL {
        let output = filters
            .apply(&input, kind)
            .unwrap_or_else(|e| panic!("{} filter failed: {}", kind.token(), e));
        assert!(output.exists(), "{} output missing", kind.token());
        assert_ne!(output, input);
        outputs.push(output);
    }

    // Filter name in the file name keeps sibling outputs from clobbering
    outputs.sort();
    outputs.dedup();
    assert_eq!(outputs.len(), FilterKind::ALL.len());
}

#[test]
fn test_rotate_swaps_dimensions() {
    let dir = TempDir::new().unwrap();
    let input = test_image(&dir);
    let filters = LocalImageFilters::new();

    let output = filters.apply(&input, FilterKind::Rotate).unwrap();
    let rotated = image::open(output).unwrap();
    assert_eq!((rotated.width(), rotated.height()), (16, 32));
}

#[test]
fn test_concat_doubles_the_width() {
    let dir = TempDir::new().unwrap();
    let input = test_image(&dir);
    let filters = LocalImageFilters::new();

    let output = filters.apply(&input, FilterKind::Concat).unwrap();
    let concatenated = image::open(output).unwrap();
    assert_eq!(
        (concatenated.width(), concatenated.height()),
        (64, 16)
    );
}

#[test]
fn test_missing_input_is_a_filter_error() {
    let filters = LocalImageFilters::new();
    let result = filters.apply(&PathBuf::from("/nonexistent/nope.png"), FilterKind::Blur);
    assert!(result.is_err());
}
