use crate::dimensions::svg_dimensions;
use crate::error::SvgToolboxError;
use crate::fs_path::{validate_read_path, validate_write_path};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    /// Lossless; the quality setting does not apply.
    Webp,
}

#[derive(Debug, Clone, Copy)]
pub struct ConversionOptions {
    /// Multiplier on the document's own dimensions.
    pub scale: f32,
    pub format: OutputFormat,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            format: OutputFormat::Png,
            quality: 90,
        }
    }
}

/// Rasterizes svg markup to an encoded image buffer.
///
/// The output size is `scale` times the document's declared dimensions
/// (viewBox or width/height); markup declaring neither fails with
/// [`SvgToolboxError::MissingDimensions`]. JPEG output is composited over
/// a white background since the format has no alpha channel.
pub fn svg_to_image(
    markup: &str,
    options: &ConversionOptions,
) -> Result<Vec<u8>, SvgToolboxError> {
    let dimensions = svg_dimensions(markup)?;
    if dimensions.width <= 0.0 || dimensions.height <= 0.0 {
        return Err(SvgToolboxError::MissingDimensions);
    }

    let width_px = (dimensions.width as f32 * options.scale).ceil().max(1.0) as u32;
    let height_px = (dimensions.height as f32 * options.scale).ceil().max(1.0) as u32;

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(markup, &opt)
        .map_err(|err| SvgToolboxError::Render(err.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px)
        .ok_or_else(|| SvgToolboxError::Render("failed to allocate pixmap".to_string()))?;
    if options.format == OutputFormat::Jpeg {
        pixmap.fill(tiny_skia::Color::WHITE);
    }

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width_px as f32 / size.width(),
        height_px as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    encode_pixmap(&pixmap, options)
}

fn encode_pixmap(
    pixmap: &tiny_skia::Pixmap,
    options: &ConversionOptions,
) -> Result<Vec<u8>, SvgToolboxError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    match options.format {
        OutputFormat::Png => pixmap
            .encode_png()
            .map_err(|err| SvgToolboxError::Encode(err.to_string())),
        OutputFormat::Jpeg => {
            // The background fill above makes every pixel opaque, so the
            // premultiplied alpha channel can be dropped as-is.
            let rgba = pixmap.data();
            let mut rgb = vec![0u8; width as usize * height as usize * 3];
            for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
                dst.copy_from_slice(&src[..3]);
            }
            let quality = options.quality.clamp(1, 100);
            let mut out = Vec::new();
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
            encoder
                .encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
                .map_err(|err| SvgToolboxError::Encode(err.to_string()))?;
            Ok(out)
        }
        OutputFormat::Webp => {
            // tiny-skia stores premultiplied pixels; WebP wants straight alpha.
            let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
            for pixel in pixmap.pixels() {
                let demultiplied = pixel.demultiply();
                rgba.extend_from_slice(&[
                    demultiplied.red(),
                    demultiplied.green(),
                    demultiplied.blue(),
                    demultiplied.alpha(),
                ]);
            }
            let mut out = Vec::new();
            image::codecs::webp::WebPEncoder::new_lossless(&mut out)
                .encode(&rgba, width, height, image::ExtendedColorType::Rgba8)
                .map_err(|err| SvgToolboxError::Encode(err.to_string()))?;
            Ok(out)
        }
    }
}

/// Reads an svg file (path is sandbox-validated) and converts it.
pub fn svg_file_to_image(
    svg_path: impl AsRef<Path>,
    options: &ConversionOptions,
) -> Result<Vec<u8>, SvgToolboxError> {
    let svg_path = validate_read_path(svg_path, &["svg"])?;
    let markup = std::fs::read_to_string(svg_path)?;
    svg_to_image(&markup, options)
}

/// Converts an svg file to a PNG file.
pub fn svg_file_to_png(
    svg_path: impl AsRef<Path>,
    png_path: impl AsRef<Path>,
    scale: f32,
) -> Result<(), SvgToolboxError> {
    let options = ConversionOptions {
        scale,
        format: OutputFormat::Png,
        ..ConversionOptions::default()
    };
    let png = svg_file_to_image(svg_path, &options)?;
    let png_path = validate_write_path(png_path, &["png"], None)?;
    std::fs::write(png_path, png)?;
    Ok(())
}
