//! The optional shape layer.
//!
//! A single vector shape drawn between the background and the text, sized as
//! a percentage of the canvas, with independent rotation and a center-relative
//! percentage offset. Geometry is emitted around the shape's own origin and
//! positioned with a translate+rotate group transform, so the rotation never
//! leaks into other layers.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::GenerationError;
use crate::surface::{Surface, smooth_paint};

use super::text::BASE_DESIGN_SIZE;
use super::{rasterize_document, xml_escape};

/// Supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Circle,
    Square,
    RoundedSquare,
    Triangle,
}

/// Stroke around the shape outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBorder {
    pub color: String,
    pub width: f32,
}

/// A fully-specified shape layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeLayerSpec {
    pub kind: ShapeKind,
    pub color: String,
    /// Shape size as a percentage of the canvas dimension.
    pub size_percent: f32,
    /// Rotation around the shape center, degrees clockwise.
    pub rotation: f32,
    /// Offsets from the canvas center, as percentages of the canvas size.
    pub x_offset_percent: f32,
    pub y_offset_percent: f32,
    /// Corner radius in base-design pixels; rounded squares only.
    pub corner_radius: f32,
    pub border: Option<ShapeBorder>,
}

impl Default for ShapeLayerSpec {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Circle,
            color: "#FF0000".to_owned(),
            size_percent: 50.0,
            rotation: 0.0,
            x_offset_percent: 0.0,
            y_offset_percent: 0.0,
            corner_radius: 4.0,
            border: None,
        }
    }
}

/// Emits the shape layer as a positioned `<g>` fragment for a
/// `canvas_size` x `canvas_size` document rendered at resize factor `scale`.
pub(crate) fn shape_markup(spec: &ShapeLayerSpec, canvas_size: f32, scale: f32) -> String {
    let shape_size = canvas_size * spec.size_percent / 100.0;
    let center_x = canvas_size / 2.0 + canvas_size * spec.x_offset_percent / 100.0;
    let center_y = canvas_size / 2.0 + canvas_size * spec.y_offset_percent / 100.0;

    let fill = Rgba8::parse(&spec.color).unwrap_or(Rgba8::new(255, 0, 0, 255));
    let mut style = format!(
        r#"fill="{}" fill-opacity="{}""#,
        fill.to_hex(),
        fill.opacity()
    );
    if let Some(border) = &spec.border {
        if border.width > 0.0 {
            if let Some(stroke) = Rgba8::parse(&border.color) {
                style.push_str(&format!(
                    r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                    stroke.to_hex(),
                    stroke.opacity(),
                    border.width * scale
                ));
            }
        }
    }

    let half = shape_size / 2.0;
    let geometry = match spec.kind {
        ShapeKind::Circle => format!(r#"<circle cx="0" cy="0" r="{half}" {style}/>"#),
        ShapeKind::Square => format!(
            r#"<rect x="{}" y="{}" width="{shape_size}" height="{shape_size}" {style}/>"#,
            -half, -half
        ),
        ShapeKind::RoundedSquare => {
            let radius = (spec.corner_radius * scale).min(half);
            format!(
                r#"<rect x="{}" y="{}" width="{shape_size}" height="{shape_size}" rx="{radius}" {style}/>"#,
                -half, -half
            )
        }
        ShapeKind::Triangle => {
            // Equilateral triangle with the apex raised past the centroid;
            // reads as visually centered at favicon sizes.
            let height = 3.0_f32.sqrt() / 2.0 * shape_size;
            format!(
                r#"<path d="M 0 {} L {} {} L {} {} Z" {style}/>"#,
                -height / 1.5,
                -half,
                height / 3.0,
                half,
                height / 3.0
            )
        }
    };

    let mut transform = format!("translate({center_x} {center_y})");
    if spec.rotation != 0.0 {
        transform.push_str(&format!(" rotate({})", spec.rotation));
    }
    format!(r#"<g transform="{}">{geometry}</g>"#, xml_escape(&transform))
}

/// Renders the shape layer onto an existing surface.
///
/// The shape is scaled for the surface's size relative to the base design
/// size, matching how it would appear inside a full text-favicon render.
pub fn render_shape_layer(
    spec: &ShapeLayerSpec,
    surface: &mut Surface,
) -> Result<(), GenerationError> {
    let size = surface.width().min(surface.height());
    let scale = size as f32 / BASE_DESIGN_SIZE as f32;
    let document = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">{}</svg>"#,
        shape_markup(spec, size as f32, scale)
    );
    let layer = rasterize_document(&document, size, size)?;
    surface.pixmap_mut().draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &smooth_paint(),
        resvg::tiny_skia::Transform::identity(),
        None,
    );
    Ok(())
}
