//! Source image loading.
//!
//! Decodes a user-supplied byte stream (PNG, JPEG, WebP, or SVG) into a
//! canonical [`Surface`]. Validation happens before any raster work: an
//! oversized or undecodable payload fails here and nothing downstream ever
//! sees it. Decoded pixels live only in this value and are dropped with it;
//! nothing is persisted.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::error::InputError;
use crate::surface::Surface;

/// Host-enforced ceiling on uploaded source size.
pub const MAX_SOURCE_BYTES: usize = 10 * 1024 * 1024;

/// A decoded source image: an immutable pixel buffer plus its dimensions.
#[derive(Debug, Clone)]
pub struct SourceImage {
    surface: Surface,
}

impl SourceImage {
    /// Decodes raw bytes into a source image.
    ///
    /// SVG payloads are rasterized at their intrinsic size; raster formats
    /// are decoded as-is. Fails with [`InputError`] on oversized, empty, or
    /// undecodable input.
    pub fn from_bytes(data: &[u8]) -> Result<Self, InputError> {
        if data.len() > MAX_SOURCE_BYTES {
            return Err(InputError::TooLarge {
                actual: data.len(),
                limit: MAX_SOURCE_BYTES,
            });
        }
        if data.is_empty() {
            return Err(InputError::UnsupportedFormat);
        }

        let surface = if looks_like_svg(data) {
            decode_svg(data)?
        } else {
            let img = image::load_from_memory(data)?.to_rgba8();
            Surface::from_rgba(&img)
        };

        log::debug!(
            "decoded source image {}x{} from {} bytes",
            surface.width(),
            surface.height(),
            data.len()
        );
        Ok(Self { surface })
    }

    /// Wraps an already-decoded surface (e.g. output of the art renderer).
    pub fn from_surface(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }
}

/// SVG detection: an XML-ish prefix after optional BOM and whitespace.
fn looks_like_svg(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'<')
}

fn decode_svg(data: &[u8]) -> Result<Surface, InputError> {
    let text = std::str::from_utf8(data).map_err(|_| InputError::UnsupportedFormat)?;
    let tree = usvg::Tree::from_str(text, &usvg::Options::default())?;

    let size = tree.size();
    let width = (size.width().ceil() as u32).max(1);
    let height = (size.height().ceil() as u32).max(1);
    let mut pixmap = Pixmap::new(width, height).ok_or(InputError::UnsupportedFormat)?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(Surface::from_pixmap(pixmap))
}
