use crate::convert::{ConversionOptions, OutputFormat, svg_to_image};
use crate::error::SvgToolboxError;
use crate::fs_path::{validate_read_path, validate_write_path};
use image::ImageEncoder;
use image::RgbaImage;
use rayon::prelude::*;
use std::path::Path;

/// Per-channel difference (0..1) above which two pixels count as different.
pub const DEFAULT_DIFF_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct DiffResult {
    /// PNG visualization: differing pixels in red, matching pixels faded
    /// to grayscale.
    pub diff_png: Vec<u8>,
    pub diff_pixel_count: usize,
}

/// Compares two encoded raster images of equal size at the pixel level.
pub fn pixel_level_diff(
    image_a: &[u8],
    image_b: &[u8],
    threshold: f32,
) -> Result<DiffResult, SvgToolboxError> {
    let a = image::load_from_memory(image_a)?.to_rgba8();
    let b = image::load_from_memory(image_b)?.to_rgba8();
    diff_rgba(&a, &b, threshold)
}

fn diff_rgba(a: &RgbaImage, b: &RgbaImage, threshold: f32) -> Result<DiffResult, SvgToolboxError> {
    if a.dimensions() != b.dimensions() {
        return Err(SvgToolboxError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }
    let (width, height) = a.dimensions();

    let mut diff = vec![0u8; a.as_raw().len()];
    let diff_pixel_count = diff
        .par_chunks_exact_mut(4)
        .zip(
            a.as_raw()
                .par_chunks_exact(4)
                .zip(b.as_raw().par_chunks_exact(4)),
        )
        .map(|(dst, (pixel_a, pixel_b))| {
            let delta = pixel_a
                .iter()
                .zip(pixel_b)
                .map(|(x, y)| x.abs_diff(*y))
                .max()
                .unwrap_or(0);
            if f32::from(delta) / 255.0 > threshold {
                dst.copy_from_slice(&[255, 0, 0, 255]);
                1
            } else {
                let luma = (0.299 * f32::from(pixel_a[0])
                    + 0.587 * f32::from(pixel_a[1])
                    + 0.114 * f32::from(pixel_a[2])) as u8;
                let faded = 255 - (255 - luma) / 10;
                dst.copy_from_slice(&[faded, faded, faded, 255]);
                0
            }
        })
        .sum();

    let mut diff_png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut diff_png)
        .write_image(&diff, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|err| SvgToolboxError::Encode(err.to_string()))?;

    Ok(DiffResult {
        diff_png,
        diff_pixel_count,
    })
}

fn load_raster(path: impl AsRef<Path>) -> Result<RgbaImage, SvgToolboxError> {
    let path = validate_read_path(path, &["svg", "png", "jpg", "jpeg", "webp"])?;
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        // Rasterize at the document's own size so equal svgs diff cleanly.
        let markup = std::fs::read_to_string(path)?;
        let png = svg_to_image(
            &markup,
            &ConversionOptions {
                scale: 1.0,
                format: OutputFormat::Png,
                ..ConversionOptions::default()
            },
        )?;
        Ok(image::load_from_memory(&png)?.to_rgba8())
    } else {
        let bytes = std::fs::read(path)?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

/// Compares two image files (svg or raster) and optionally writes the diff
/// visualization PNG.
pub fn diff_images(
    path_a: impl AsRef<Path>,
    path_b: impl AsRef<Path>,
    diff_path: Option<&Path>,
    threshold: f32,
) -> Result<DiffResult, SvgToolboxError> {
    let a = load_raster(path_a)?;
    let b = load_raster(path_b)?;
    let result = diff_rgba(&a, &b, threshold)?;

    if let Some(diff_path) = diff_path {
        let diff_path = validate_write_path(diff_path, &["png"], None)?;
        std::fs::write(diff_path, &result.diff_png)?;
    }

    Ok(result)
}
