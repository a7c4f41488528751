//! Multi-size generation.
//!
//! The orchestrator walks a requested size list sequentially, composing,
//! color-adjusting, and encoding one size at a time, so only one intermediate
//! surface of each kind is alive at any moment. A failed size is logged and
//! skipped; it never aborts the batch. Progress is reported after every
//! attempt, success or failure, so a host UI can show incremental feedback.
//!
//! An empty size list is not an error: it yields an empty artifact list and
//! no progress events.

use std::io::Cursor;

use image::codecs::ico::IcoEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::art::text::{TextFaviconSpec, render_text_favicon};
use crate::catalog::find_size;
use crate::color::adjust;
use crate::compose::compose;
use crate::error::GenerationError;
use crate::options::{OutputFormat, RenderOptions};
use crate::srcimg::SourceImage;
use crate::surface::Surface;

// ============================================================================
// Artifacts & progress
// ============================================================================

/// One generated output file.
///
/// Owned by the caller after generation; the pipeline keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Deterministic filename: `favicon-{s}x{s}.{ext}`.
    pub name: String,
    /// Encoded payload.
    pub bytes: Vec<u8>,
    /// Reported dimensions, e.g. `"32x32"`.
    pub dimensions: String,
    pub format: OutputFormat,
    /// Human description from the size catalog, when the size is known.
    pub description: String,
}

impl GeneratedArtifact {
    /// Payload size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// The payload, or an error when the artifact carries none. The
    /// packager consumes artifacts through this accessor so a bad payload
    /// can be skipped without failing the archive.
    pub fn payload(&self) -> Result<&[u8], GenerationError> {
        if self.bytes.is_empty() {
            Err(GenerationError::EmptyPayload(self.name.clone()))
        } else {
            Ok(&self.bytes)
        }
    }
}

/// Progress report emitted after each size attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProgress {
    /// 1-based index of the attempt just finished.
    pub current: usize,
    pub total: usize,
    pub stage: String,
    /// Rounded completion percentage.
    pub percentage: u8,
}

// ============================================================================
// Generation
// ============================================================================

/// Generates one artifact per requested size from an uploaded source image.
///
/// Returns whatever succeeded; failed sizes are logged and omitted.
pub fn generate_favicons(
    source: &SourceImage,
    sizes: &[u32],
    options: &RenderOptions,
    on_progress: impl FnMut(&GenerationProgress),
) -> Vec<GeneratedArtifact> {
    let adjustment = options.adjustment();
    run_batch(sizes, options.format, options.quality, on_progress, |size| {
        let composed = compose(source.surface(), size, options);
        Ok(adjust(&composed, &adjustment))
    })
}

/// Generates one PNG artifact per requested size from a text-favicon spec.
pub fn generate_text_favicons(
    spec: &TextFaviconSpec,
    sizes: &[u32],
    on_progress: impl FnMut(&GenerationProgress),
) -> Vec<GeneratedArtifact> {
    run_batch(sizes, OutputFormat::Png, 0.9, on_progress, |size| {
        render_text_favicon(spec, size)
    })
}

/// The shared sequential loop: render, encode, wrap, report.
fn run_batch(
    sizes: &[u32],
    format: OutputFormat,
    quality: f32,
    mut on_progress: impl FnMut(&GenerationProgress),
    mut render: impl FnMut(u32) -> Result<Surface, GenerationError>,
) -> Vec<GeneratedArtifact> {
    let total = sizes.len();
    let mut artifacts = Vec::with_capacity(total);

    for (index, &size) in sizes.iter().enumerate() {
        match render(size).and_then(|surface| encode_surface(&surface, format, quality)) {
            Ok(bytes) => {
                log::debug!("generated {size}x{size} ({} bytes)", bytes.len());
                artifacts.push(make_artifact(size, format, bytes));
            }
            Err(err) => log::warn!("skipping {size}x{size}: {err}"),
        }

        let current = index + 1;
        on_progress(&GenerationProgress {
            current,
            total,
            stage: format!("Generating {size}x{size}"),
            percentage: (current as f32 / total as f32 * 100.0).round() as u8,
        });
    }

    artifacts
}

fn make_artifact(size: u32, format: OutputFormat, bytes: Vec<u8>) -> GeneratedArtifact {
    GeneratedArtifact {
        name: format!("favicon-{size}x{size}.{}", format.extension()),
        bytes,
        dimensions: format!("{size}x{size}"),
        format,
        description: find_size(size)
            .map(|spec| spec.description.to_owned())
            .unwrap_or_else(|| format!("{size}x{size} favicon")),
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a surface to bytes in the requested format.
///
/// `quality` (0.0-1.0) applies to JPEG; PNG and ICO are lossless and the
/// WebP encoder in this stack is lossless-only. ICO is limited to 256 px a
/// side by the format; larger requests fail here and get skipped by the
/// batch loop.
pub fn encode_surface(
    surface: &Surface,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, GenerationError> {
    let rgba = surface.to_rgba();
    let (width, height) = (rgba.width(), rgba.height());
    let mut out = Vec::new();
    let encode_err = |source| GenerationError::Encode {
        size: width,
        format: format.extension(),
        source,
    };

    match format {
        OutputFormat::Png => PngEncoder::new(Cursor::new(&mut out))
            .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(encode_err)?,
        OutputFormat::Webp => WebPEncoder::new_lossless(Cursor::new(&mut out))
            .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(encode_err)?,
        OutputFormat::Ico => IcoEncoder::new(Cursor::new(&mut out))
            .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(encode_err)?,
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; flatten first.
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            let jpeg_quality = (quality * 100.0).clamp(1.0, 100.0) as u8;
            JpegEncoder::new_with_quality(Cursor::new(&mut out), jpeg_quality)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(encode_err)?
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    fn blue_source(width: u32, height: u32) -> SourceImage {
        let mut surface = Surface::new(width, height);
        surface.fill(Rgba8::new(0, 0, 255, 255));
        SourceImage::from_surface(surface)
    }

    #[test]
    fn generates_an_artifact_per_size() {
        let source = blue_source(100, 100);
        let options = RenderOptions::default().with_background("#FFFFFF");
        let mut events = Vec::new();
        let artifacts =
            generate_favicons(&source, &[16, 32], &options, |p| events.push(p.clone()));

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "favicon-16x16.png");
        assert_eq!(artifacts[1].name, "favicon-32x32.png");
        assert_eq!(artifacts[0].dimensions, "16x16");
        assert_eq!(artifacts[0].description, "Browser tab icon");
        assert!(artifacts[0].byte_len() > 0);

        // A fully-covering source leaves no visible background.
        let decoded = image::load_from_memory(&artifacts[0].bytes)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
        assert_eq!(decoded.get_pixel(8, 8).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255, 255]);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].current, 1);
        assert_eq!(events[0].total, 2);
        assert_eq!(events[0].percentage, 50);
        assert_eq!(events[1].percentage, 100);
    }

    #[test]
    fn png_round_trip_preserves_dimensions() {
        let source = blue_source(97, 43);
        let artifacts =
            generate_favicons(&source, &[48], &RenderOptions::default(), |_| {});
        let decoded = image::load_from_memory(&artifacts[0].bytes).unwrap();
        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn failed_size_is_skipped_but_reported() {
        // ICO cannot encode above 256 px, so 512 fails while its neighbours
        // succeed.
        let source = blue_source(64, 64);
        let options = RenderOptions::default().with_format(OutputFormat::Ico);
        let mut events = Vec::new();
        let artifacts =
            generate_favicons(&source, &[16, 512, 32], &options, |p| events.push(p.clone()));

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "favicon-16x16.ico");
        assert_eq!(artifacts[1].name, "favicon-32x32.ico");

        assert_eq!(events.len(), 3);
        assert_eq!(
            events.iter().map(|e| e.current).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(events[1].stage, "Generating 512x512");
        assert_eq!(events[0].percentage, 33);
        assert_eq!(events[2].percentage, 100);
    }

    #[test]
    fn zero_sizes_short_circuits() {
        let source = blue_source(8, 8);
        let mut events = 0;
        let artifacts =
            generate_favicons(&source, &[], &RenderOptions::default(), |_| events += 1);
        assert!(artifacts.is_empty());
        assert_eq!(events, 0);
    }

    #[test]
    fn jpeg_encoding_flattens_alpha() {
        let surface = Surface::new(10, 10);
        let bytes = encode_surface(&surface, OutputFormat::Jpeg, 0.9).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 10);
    }

    #[test]
    fn webp_encoding_round_trips() {
        let mut surface = Surface::new(12, 12);
        surface.fill(Rgba8::new(10, 200, 30, 255));
        let bytes = encode_surface(&surface, OutputFormat::Webp, 0.9).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(6, 6).0, [10, 200, 30, 255]);
    }

    #[test]
    fn text_batch_produces_png_artifacts() {
        let spec = TextFaviconSpec::default();
        let artifacts = generate_text_favicons(&spec, &[16, 64], |_| {});
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "favicon-16x16.png");
        let decoded = image::load_from_memory(&artifacts[1].bytes).unwrap();
        assert_eq!(decoded.width(), 64);
    }

    #[test]
    fn payload_accessor_flags_empty_artifacts() {
        let artifact = make_artifact(16, OutputFormat::Png, Vec::new());
        assert!(artifact.payload().is_err());
        let artifact = make_artifact(16, OutputFormat::Png, vec![1, 2, 3]);
        assert_eq!(artifact.payload().unwrap(), &[1, 2, 3]);
    }
}
