//! Procedural art rendering.
//!
//! The alternative source-of-truth to an uploaded image: styled text and
//! shape layers are expressed as generated SVG markup and rasterized in one
//! pass. Each visual layer (background + frame, shape, text) is an isolated
//! markup group with its own transform, so rotation or clipping set for one
//! layer never bleeds into the next.
//!
//! Submodules:
//! - [`gradient`]: direction-to-coordinate math for background gradients
//! - [`shape`]: the optional shape layer
//! - [`text`]: the full text-favicon renderer and its spec
//! - [`presets`]: complete, fully-specified preset styles

pub mod gradient;
pub mod presets;
pub mod shape;
pub mod text;

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use crate::error::GenerationError;
use crate::surface::Surface;

/// Parses and rasterizes a generated SVG document onto a fresh surface.
pub(crate) fn rasterize_document(
    svg: &str,
    width: u32,
    height: u32,
) -> Result<Surface, GenerationError> {
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)?;

    let width = width.max(1);
    let height = height.max(1);
    let mut pixmap = match Pixmap::new(width, height) {
        Some(pixmap) => pixmap,
        None => Pixmap::new(1, 1).expect("1x1 pixmap"),
    };
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(Surface::from_pixmap(pixmap))
}

/// System font database, loaded once per process. Font resolution only
/// matters for text layers; shape/gradient rendering works without any
/// fonts installed.
fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("loaded {} font faces", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Escapes a string for use in SVG attribute values and text content.
pub(crate) fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
