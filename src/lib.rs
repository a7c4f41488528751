//! favkit: favicon set rendering and packaging
//!
//! This crate turns a source image or a styled-text description into a
//! complete set of website icon assets: raster files at every requested
//! size, a web app manifest, head markup, and a single downloadable archive
//! bundling it all.
//!
//! The pipeline is a fixed sequence of deterministic raster stages (decode,
//! crop/clip, color-adjust, composite, scale, encode, package) applied
//! identically whether the source is an uploaded bitmap or procedurally
//! drawn text art. All work is synchronous and local; source pixels never
//! leave process memory.
//!
//! # Example: text favicon to archive
//!
//! ```
//! use favkit::{
//!     TextFaviconSpec, WebManifest, build_archive, favicon_html, generate_text_favicons,
//! };
//!
//! let spec = TextFaviconSpec::default().with_text("F");
//! let artifacts = generate_text_favicons(&spec, &[16, 32, 180], |progress| {
//!     println!("{} ({}%)", progress.stage, progress.percentage);
//! });
//! assert_eq!(artifacts.len(), 3);
//!
//! let manifest = WebManifest::new("My Site", "#3B82F6", "#FFFFFF", None);
//! let archive = build_archive(
//!     &artifacts,
//!     Some(&manifest.to_json().unwrap()),
//!     Some(&favicon_html("My Site", "#3B82F6")),
//!     None,
//! )
//! .unwrap();
//! assert!(!archive.is_empty());
//! ```
//!
//! # Example: uploaded image
//!
//! ```no_run
//! use favkit::{CropRegion, RenderOptions, SourceImage, generate_favicons, recommended_sizes};
//!
//! let bytes = std::fs::read("logo.png").unwrap();
//! let source = SourceImage::from_bytes(&bytes).unwrap();
//! let options = RenderOptions::default()
//!     .with_background("#FFFFFF")
//!     .with_crop(CropRegion::new(10.0, 10.0, 200.0, 200.0).with_corner_radius(100.0));
//! let artifacts = generate_favicons(&source, &recommended_sizes(), &options, |_| {});
//! ```

mod art;
mod catalog;
mod color;
mod compose;
mod error;
mod generate;
mod manifest;
mod options;
mod package;
mod srcimg;
mod surface;

pub use art::gradient::{GradientDirection, GradientSpec, linear_endpoints};
pub use art::presets::{StylePreset, find_preset, preset_styles};
pub use art::shape::{ShapeBorder, ShapeKind, ShapeLayerSpec, render_shape_layer};
pub use art::text::{
    BASE_DESIGN_SIZE, MAX_TEXT_CHARS, OutlineSpec, TextAlign, TextCase, TextFaviconSpec,
    apply_text_case, render_text_favicon,
};
pub use catalog::{
    SIZE_CATALOG, SizeCategory, SizeSpec, find_size, recommended_sizes, sizes_in_category,
};
pub use color::{ColorAdjustment, Rgba8, adjust};
pub use compose::compose;
pub use error::{GenerationError, InputError, PackageError};
pub use generate::{
    GeneratedArtifact, GenerationProgress, encode_surface, generate_favicons,
    generate_text_favicons,
};
pub use manifest::{
    ManifestIcon, WebManifest, browser_config_xml, browser_snippets, favicon_html,
};
pub use options::{
    BorderSpec, CropRegion, EffectOptions, GlowSpec, OutputFormat, RenderOptions, ShadowSpec,
};
pub use package::{
    DEFAULT_README, HTML_SNIPPET_FILE, MANIFEST_FILE, build_archive, build_package,
};
pub use srcimg::{MAX_SOURCE_BYTES, SourceImage};
pub use surface::Surface;
