//! # Image Filter Collaborator
//!
//! Thin adapter over the image-transform library. The dispatch engine
//! only decides *which* filters run; the transforms themselves live
//! behind the `ImageFilters` trait, with a local implementation backed
//! by the `image` / `imageproc` crates.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use rand::Rng;
use tracing::debug;

use crate::errors::{BotError, BotResult};
use crate::filter_dispatch::FilterKind;

/// Image-transform collaborator: apply one filter to a local file and
/// return the path of the transformed copy.
pub trait ImageFilters: Send + Sync {
    fn apply(&self, path: &Path, kind: FilterKind) -> BotResult<PathBuf>;
}

/// Filter implementation operating on local files
#[derive(Debug, Default)]
pub struct LocalImageFilters;

impl LocalImageFilters {
    pub fn new() -> Self {
        Self
    }
}

impl ImageFilters for LocalImageFilters {
    fn apply(&self, path: &Path, kind: FilterKind) -> BotResult<PathBuf> {
        let image = image::open(path)
            .map_err(|e| BotError::Filter(format!("failed to load {}: {}", path.display(), e)))?;

        let transformed = match kind {
            FilterKind::Rotate => image.rotate90(),
            FilterKind::Blur => image.blur(2.0),
            FilterKind::Contour => contour(&image),
            FilterKind::SaltNPepper => salt_n_pepper(&image),
            FilterKind::Concat => concat(&image),
            FilterKind::Segment => segment(&image),
        };

        let output_path = derived_output_path(path, kind);
        transformed.save(&output_path).map_err(|e| {
            BotError::Filter(format!("failed to save {}: {}", output_path.display(), e))
        })?;

        debug!(
            filter = kind.token(),
            output = %output_path.display(),
            "Filter applied"
        );
        Ok(output_path)
    }
}

/// Derive the output path from the input path and the filter name.
///
/// The filter name is part of the file name so two filters requested in
/// the same caption never clobber each other's output.
pub fn derived_output_path(path: &Path, kind: FilterKind) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("photo");
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpg");
    let token = kind.token().replace('-', "_");
    path.with_file_name(format!("{}_{}.{}", stem, token, extension))
}

fn contour(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let edges = imageproc::edges::canny(&gray, 50.0, 100.0);
    DynamicImage::ImageLuma8(edges)
}

fn salt_n_pepper(image: &DynamicImage) -> DynamicImage {
    let mut pixels = image.to_rgba8();
    let mut rng = rand::rng();
    for pixel in pixels.pixels_mut() {
        let roll: f64 = rng.random();
        if roll < 0.05 {
            pixel.0 = [255, 255, 255, 255];
        } else if roll > 0.95 {
            pixel.0 = [0, 0, 0, 255];
        }
    }
    DynamicImage::ImageRgba8(pixels)
}

fn concat(image: &DynamicImage) -> DynamicImage {
    let source = image.to_rgba8();
    let (width, height) = source.dimensions();
    let mut canvas = image::RgbaImage::new(width * 2, height);
    image::imageops::replace(&mut canvas, &source, 0, 0);
    image::imageops::replace(&mut canvas, &source, i64::from(width), 0);
    DynamicImage::ImageRgba8(canvas)
}

fn segment(image: &DynamicImage) -> DynamicImage {
    let mut gray = image.to_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > 127 { 255 } else { 0 };
    }
    DynamicImage::ImageLuma8(gray)
}
