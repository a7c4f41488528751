//! Error taxonomy for the favicon pipeline.
//!
//! Three families with different propagation rules:
//!
//! - [`InputError`]: source validation/decoding. Raised synchronously before
//!   any raster work begins; no partial state is created.
//! - [`GenerationError`]: a single size failed to render or encode. Caught
//!   inside the generation loop, logged, and the batch continues.
//! - [`PackageError`]: the archive writer itself failed. Fatal to the
//!   archive-build call only; already-generated artifacts stay valid.
//!
//! Degenerate-but-well-formed configuration (zero requested sizes, a crop
//! that clamps to zero area) is not an error anywhere in the pipeline; it
//! short-circuits to an empty or background-only result instead.

use thiserror::Error;

/// Errors raised while validating or decoding a source image.
#[derive(Debug, Error)]
pub enum InputError {
    /// The uploaded payload exceeds the size ceiling.
    #[error("source image is {actual} bytes, exceeding the {limit} byte limit")]
    TooLarge { actual: usize, limit: usize },

    /// The payload is empty or not recognizable as any supported format.
    #[error("source data is not a supported image format")]
    UnsupportedFormat,

    /// A raster codec rejected the payload.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// An SVG payload could not be parsed.
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
}

/// Errors for a single size within a generation batch.
///
/// These never escape [`generate_favicons`](crate::generate_favicons); the
/// orchestrator logs them and moves on to the next size.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Encoding the composed surface to the requested format failed
    /// (e.g. ICO above its 256 px dimension limit).
    #[error("failed to encode {size}x{size} as {format}: {source}")]
    Encode {
        size: u32,
        format: &'static str,
        source: image::ImageError,
    },

    /// The generated art markup was rejected by the SVG renderer.
    #[error("failed to render text favicon art: {0}")]
    Art(#[from] resvg::usvg::Error),

    /// An artifact carried no payload when the packager consumed it.
    #[error("artifact {0} has an empty payload")]
    EmptyPayload(String),
}

/// Errors while assembling the downloadable archive.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
