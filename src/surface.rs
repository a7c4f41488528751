//! Raster surfaces.
//!
//! A [`Surface`] is a fixed-size, premultiplied-alpha pixel buffer that every
//! other stage of the pipeline draws onto. All scaled draws use bicubic
//! filtering: downscaling a large photo to 16x16 with nearest-neighbour
//! sampling produces unusable aliased output, so smoothing quality is part of
//! the surface contract rather than a per-call option.

use image::RgbaImage;
use resvg::tiny_skia::{
    ColorU8, FilterQuality, Mask, Pixmap, PixmapPaint, PixmapRef, Transform,
};

use crate::color::Rgba8;

/// An in-memory 2D raster buffer with a drawable/readable pixel interface.
///
/// Wraps a premultiplied [`Pixmap`]; conversions to and from the
/// unpremultiplied [`RgbaImage`] representation used by codecs and the color
/// engine happen at the edges via [`to_rgba`](Self::to_rgba) and
/// [`from_rgba`](Self::from_rgba).
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Creates a transparent surface of the given dimensions.
    ///
    /// Dimensions are clamped to at least 1 pixel; a degenerate request
    /// yields a 1x1 surface rather than an error.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        // Pixmap::new only fails for zero or absurdly large dimensions; the
        // clamp above rules out zero, and favicon sizes stay far below the
        // i32 coordinate limit.
        let pixmap = Pixmap::new(width, height)
            .unwrap_or_else(|| Pixmap::new(1, 1).expect("1x1 pixmap"));
        Self { pixmap }
    }

    /// Returns the pixel width.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Returns the pixel height.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills the whole surface with a color, replacing existing content.
    pub fn fill(&mut self, color: Rgba8) {
        self.pixmap.fill(color.to_skia());
    }

    /// Borrows the underlying pixmap for drawing.
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Borrows the underlying pixmap read-only.
    pub fn as_ref(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }

    /// Draws another surface onto this one through `transform`, using the
    /// surface contract's bicubic filtering, optionally clipped by `mask`.
    pub fn draw_surface(&mut self, src: &Surface, transform: Transform, mask: Option<&Mask>) {
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &smooth_paint(), transform, mask);
    }

    /// Reads one pixel, unpremultiplied. Out-of-bounds reads return
    /// transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        match self.pixmap.pixel(x, y) {
            Some(px) => {
                let c = px.demultiply();
                (c.red(), c.green(), c.blue(), c.alpha())
            }
            None => (0, 0, 0, 0),
        }
    }

    /// Converts to an unpremultiplied RGBA image for codecs and per-pixel
    /// color math.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        for (px, out) in self.pixmap.pixels().iter().zip(img.pixels_mut()) {
            let c = px.demultiply();
            out.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        img
    }

    /// Builds a surface from an unpremultiplied RGBA image.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let mut surface = Self::new(img.width(), img.height());
        for (src, dst) in img.pixels().zip(surface.pixmap.pixels_mut().iter_mut()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        surface
    }

    /// Wraps an already-rendered pixmap.
    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }
}

/// Paint settings for every surface-to-surface draw: source-over blending
/// with bicubic resampling.
pub(crate) fn smooth_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    }
}
