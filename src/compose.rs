//! Geometric compositing: crop, clip, center, frame, and border.
//!
//! [`compose`] turns a source surface into one correctly-sized square output
//! surface. The stages run in a fixed order:
//!
//! 1. background fill
//! 2. crop extraction (clamped to source bounds, optional rounded-corner
//!    clip capped at half the smaller crop dimension)
//! 3. aspect-preserving scale, centered in the target square
//! 4. final frame radius, forced to a full circle when the crop itself was
//!    effectively circular
//! 5. copy-then-reclip so the background survives the frame clip
//! 6. border stroke, inset by half its width and hugging the frame corners
//!
//! Crop bounds use rounded integer pixel coordinates; scale and centering
//! use floating point. The whole function is total: degenerate input (a crop
//! that clamps to zero area) produces a background-only result, never an
//! error.

use resvg::tiny_skia::{FillRule, Mask, Paint, Path, PathBuilder, Rect, Stroke, Transform};

use crate::color::Rgba8;
use crate::options::{CropRegion, RenderOptions};
use crate::surface::{Surface, smooth_paint};

/// Composes `source` into a `target_size` x `target_size` output surface.
pub fn compose(source: &Surface, target_size: u32, options: &RenderOptions) -> Surface {
    let target_size = target_size.max(1);
    let size = target_size as f32;

    let mut canvas = Surface::new(target_size, target_size);
    let background = options.background();
    if let Some(bg) = background {
        canvas.fill(bg);
    }

    let content = match &options.crop {
        Some(crop) => extract_crop(source, crop),
        None => Some(source.clone()),
    };

    if let Some(content) = &content {
        let scale = (size / content.width() as f32).min(size / content.height() as f32);
        let offset_x = (size - content.width() as f32 * scale) / 2.0;
        let offset_y = (size - content.height() as f32 * scale) / 2.0;
        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        canvas.draw_surface(content, transform, None);
    }

    let frame_radius = if options
        .crop
        .as_ref()
        .is_some_and(CropRegion::is_effectively_circular)
    {
        size / 2.0
    } else {
        options.border_radius
    };

    if frame_radius > 0.0 {
        canvas = reclip_to_frame(&canvas, frame_radius, background);
    }

    if let Some(border) = &options.border {
        if border.width > 0.0 {
            if let Some(color) = Rgba8::parse(&border.color) {
                stroke_frame(&mut canvas, border.width, frame_radius, color);
            }
        }
    }

    canvas
}

/// Extracts the crop region into its own surface, clipped to a rounded
/// rectangle when a corner radius is set.
///
/// Returns `None` when the clamped region has zero area.
fn extract_crop(source: &Surface, crop: &CropRegion) -> Option<Surface> {
    let source_w = i64::from(source.width());
    let source_h = i64::from(source.height());

    let x = (crop.x.round() as i64).clamp(0, source_w);
    let y = (crop.y.round() as i64).clamp(0, source_h);
    let width = (crop.width.round() as i64).clamp(0, source_w - x);
    let height = (crop.height.round() as i64).clamp(0, source_h - y);
    if width == 0 || height == 0 {
        return None;
    }

    let mut out = Surface::new(width as u32, height as u32);
    let mask = if crop.corner_radius > 0.0 {
        let radius = crop
            .corner_radius
            .min(width as f32 / 2.0)
            .min(height as f32 / 2.0);
        rounded_rect_mask(width as u32, height as u32, radius)
    } else {
        None
    };

    out.pixmap_mut().draw_pixmap(
        -(x as i32),
        -(y as i32),
        source.as_ref(),
        &smooth_paint(),
        Transform::identity(),
        mask.as_ref(),
    );
    Some(out)
}

/// Re-clips the composed square to a rounded frame, re-filling the
/// background first so it is preserved inside the new frame shape.
fn reclip_to_frame(canvas: &Surface, radius: f32, background: Option<Rgba8>) -> Surface {
    let width = canvas.width();
    let size = width as f32;
    let Some(path) = rounded_rect_path(0.0, 0.0, size, size, radius) else {
        return canvas.clone();
    };
    let Some(mask) = mask_from_path(width, width, &path) else {
        return canvas.clone();
    };

    let mut framed = Surface::new(width, width);
    if let Some(bg) = background {
        framed.pixmap_mut().fill_path(
            &path,
            &solid_paint(bg),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    framed.pixmap_mut().draw_pixmap(
        0,
        0,
        canvas.as_ref(),
        &smooth_paint(),
        Transform::identity(),
        Some(&mask),
    );
    framed
}

/// Strokes the frame border, inset by half the border width. The stroke's
/// corner radius shrinks with the inset so the border hugs the frame edge.
fn stroke_frame(canvas: &mut Surface, width: f32, frame_radius: f32, color: Rgba8) {
    let size = canvas.width() as f32;
    let inset = width / 2.0;
    let stroke_radius = (frame_radius - width / 2.0).max(0.0);
    let Some(path) =
        rounded_rect_path(inset, inset, size - width, size - width, stroke_radius)
    else {
        return;
    };

    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    canvas.pixmap_mut().stroke_path(
        &path,
        &solid_paint(color),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn solid_paint(color: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// A rounded rectangle path; the radius is capped at half the smaller
/// dimension. Corners are circle-arc cubic approximations.
pub(crate) fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(Rect::from_xywh(x, y, w, h)?));
    }

    // Cubic control-point distance for a quarter circle.
    let k = r * (4.0 / 3.0) * (std::f32::consts::SQRT_2 - 1.0);
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn mask_from_path(width: u32, height: u32, path: &Path) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

pub(crate) fn rounded_rect_mask(width: u32, height: u32, radius: f32) -> Option<Mask> {
    let path = rounded_rect_path(0.0, 0.0, width as f32, height as f32, radius)?;
    mask_from_path(width, height, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BorderSpec;

    fn solid(width: u32, height: u32, color: Rgba8) -> Surface {
        let mut surface = Surface::new(width, height);
        surface.fill(color);
        surface
    }

    const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

    #[test]
    fn output_is_square_at_requested_size() {
        let source = solid(100, 60, BLUE);
        for size in [1u32, 16, 32, 180, 512] {
            let out = compose(&source, size, &RenderOptions::default());
            assert_eq!(out.width(), size);
            assert_eq!(out.height(), size);
        }
    }

    #[test]
    fn full_coverage_source_leaves_no_background() {
        let source = solid(100, 100, BLUE);
        let options = RenderOptions::default().with_background("#FFFFFF");
        let out = compose(&source, 16, &options);
        assert_eq!(out.pixel(0, 0), (0, 0, 255, 255));
        assert_eq!(out.pixel(8, 8), (0, 0, 255, 255));
        assert_eq!(out.pixel(15, 15), (0, 0, 255, 255));
    }

    #[test]
    fn wide_source_is_letterboxed_and_centered() {
        let source = solid(100, 50, BLUE);
        let out = compose(&source, 40, &RenderOptions::default());
        // Content occupies the middle 40x20 band.
        assert_eq!(out.pixel(20, 20), (0, 0, 255, 255));
        assert_eq!(out.pixel(20, 2).3, 0);
        assert_eq!(out.pixel(20, 37).3, 0);
    }

    #[test]
    fn letterbox_band_shows_background() {
        let source = solid(100, 50, BLUE);
        let options = RenderOptions::default().with_background("#FFFFFF");
        let out = compose(&source, 40, &options);
        assert_eq!(out.pixel(20, 2), (255, 255, 255, 255));
        assert_eq!(out.pixel(20, 20), (0, 0, 255, 255));
    }

    #[test]
    fn crop_extracts_requested_region() {
        // Left half red, right half blue.
        let mut source = Surface::new(100, 100);
        source.fill(Rgba8::new(255, 0, 0, 255));
        let blue_half = solid(50, 100, BLUE);
        source.draw_surface(&blue_half, Transform::from_translate(50.0, 0.0), None);

        let options =
            RenderOptions::default().with_crop(CropRegion::new(50.0, 0.0, 50.0, 100.0));
        let out = compose(&source, 20, &options);
        // Cropped content is the blue half only, letterboxed horizontally.
        assert_eq!(out.pixel(10, 10), (0, 0, 255, 255));
    }

    #[test]
    fn circular_crop_forces_circular_frame() {
        let source = solid(50, 50, BLUE);
        let crop = CropRegion::new(0.0, 0.0, 50.0, 50.0).with_corner_radius(25.0);
        let mut options = RenderOptions::default().with_crop(crop);
        // A competing frame radius must lose to the forced circle.
        options.border_radius = 2.0;

        let out = compose(&source, 40, &options);
        assert_eq!(out.pixel(20, 20), (0, 0, 255, 255));
        // (3,3) is ~24px from center, outside the radius-20 circle, but would
        // be opaque under a mere 2px corner radius.
        assert_eq!(out.pixel(3, 3).3, 0);
        assert_eq!(out.pixel(0, 0).3, 0);
    }

    #[test]
    fn zero_area_crop_short_circuits_to_background() {
        let source = solid(100, 100, BLUE);
        let options = RenderOptions::default()
            .with_background("#FFFFFF")
            .with_crop(CropRegion::new(500.0, 0.0, 50.0, 50.0));
        let out = compose(&source, 16, &options);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(out.pixel(x, y), (255, 255, 255, 255));
            }
        }
    }

    #[test]
    fn crop_is_clamped_to_source_bounds() {
        let source = solid(10, 10, BLUE);
        let options =
            RenderOptions::default().with_crop(CropRegion::new(-5.0, -5.0, 100.0, 100.0));
        let out = compose(&source, 10, &options);
        assert_eq!(out.pixel(5, 5), (0, 0, 255, 255));
    }

    #[test]
    fn frame_radius_clips_corners() {
        let source = solid(64, 64, BLUE);
        let mut options = RenderOptions::default();
        options.border_radius = 8.0;
        let out = compose(&source, 32, &options);
        assert_eq!(out.pixel(0, 0).3, 0);
        assert_eq!(out.pixel(16, 16), (0, 0, 255, 255));
    }

    #[test]
    fn frame_reclip_preserves_background() {
        // Narrow source leaves side bands; after the frame reclip those
        // bands must still show the background inside the rounded frame.
        let source = solid(50, 100, BLUE);
        let mut options = RenderOptions::default().with_background("#FFFFFF");
        options.border_radius = 6.0;
        let out = compose(&source, 40, &options);
        assert_eq!(out.pixel(2, 20), (255, 255, 255, 255));
        assert_eq!(out.pixel(20, 20), (0, 0, 255, 255));
        assert_eq!(out.pixel(0, 0).3, 0);
    }

    #[test]
    fn border_strokes_the_frame_edge() {
        let source = solid(64, 64, BLUE);
        let options =
            RenderOptions::default().with_border(BorderSpec::new("#000000", 4.0));
        let out = compose(&source, 32, &options);
        // Inside the 4px stroke band on the left edge.
        assert_eq!(out.pixel(1, 16), (0, 0, 0, 255));
        // Center stays content-colored.
        assert_eq!(out.pixel(16, 16), (0, 0, 255, 255));
    }

    #[test]
    fn zero_width_border_is_ignored() {
        let source = solid(64, 64, BLUE);
        let options = RenderOptions::default().with_border(BorderSpec::new("#000000", 0.0));
        let out = compose(&source, 32, &options);
        assert_eq!(out.pixel(1, 16), (0, 0, 255, 255));
    }
}
