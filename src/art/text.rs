//! Text favicon rendering.
//!
//! A [`TextFaviconSpec`] is the procedural counterpart of an uploaded source
//! image: a short piece of styled text over a solid or gradient background,
//! optionally with a shape layer behind it. The spec is authored against a
//! 64-px base design; rendering at any other size scales every numeric
//! parameter by `size / 64`, so a 512-px export is the same composition as
//! the 64-px preview, only larger.
//!
//! Layer order inside the generated document: background (+ border), frame
//! clip, shape layer, text. The text anchor doubles as the rotation pivot:
//! rotation spins the text around its own anchor point, not the canvas
//! center.

use serde::{Deserialize, Serialize};

use crate::color::{ColorAdjustment, Rgba8, adjust};
use crate::error::GenerationError;
use crate::options::{BorderSpec, GlowSpec, ShadowSpec};
use crate::surface::Surface;

use super::gradient::{GradientSpec, gradient_defs};
use super::shape::{ShapeLayerSpec, shape_markup};
use super::{rasterize_document, xml_escape};

/// The size every spec's numeric parameters are authored against.
pub const BASE_DESIGN_SIZE: u32 = 64;

/// Favicon text is capped at this many characters; anything longer is
/// silently truncated.
pub const MAX_TEXT_CHARS: usize = 3;

// ============================================================================
// Enums
// ============================================================================

/// Horizontal anchor of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Case transform applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Applies a [`TextCase`] transform.
pub fn apply_text_case(text: &str, case: TextCase) -> String {
    match case {
        TextCase::None => text.to_owned(),
        TextCase::Uppercase => text.to_uppercase(),
        TextCase::Lowercase => text.to_lowercase(),
        TextCase::Capitalize => {
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        }
    }
}

/// Stroked outline drawn behind the text fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSpec {
    pub color: String,
    pub width: f32,
}

// ============================================================================
// TextFaviconSpec
// ============================================================================

/// A complete text-favicon description. Plain values throughout; re-created
/// on every preview or generation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFaviconSpec {
    pub text: String,
    /// Font size in base-design pixels.
    pub font_size: f32,
    pub font_family: String,
    /// CSS numeric weight (100-900).
    pub font_weight: u16,
    pub text_color: String,
    pub background_color: String,
    pub text_align: TextAlign,
    /// Frame corner radius in base-design pixels.
    pub border_radius: f32,
    /// Distance from the edge for left/right alignment, base-design pixels.
    pub padding: f32,
    pub letter_spacing: f32,
    pub text_case: TextCase,
    /// Degrees clockwise around the text anchor.
    pub rotation: f32,
    pub outline: Option<OutlineSpec>,
    /// Shadow wins over glow when both are set.
    pub shadow: Option<ShadowSpec>,
    pub glow: Option<GlowSpec>,
    pub gradient: Option<GradientSpec>,
    pub border: Option<BorderSpec>,
    pub shape_layer: Option<ShapeLayerSpec>,
    /// Percentages where 100 = no change, applied after rasterization.
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for TextFaviconSpec {
    fn default() -> Self {
        Self {
            text: "A".to_owned(),
            font_size: 32.0,
            font_family: "Arial".to_owned(),
            font_weight: 700,
            text_color: "#FFFFFF".to_owned(),
            background_color: "#3B82F6".to_owned(),
            text_align: TextAlign::Center,
            border_radius: 8.0,
            padding: 8.0,
            letter_spacing: 0.0,
            text_case: TextCase::None,
            rotation: 0.0,
            outline: None,
            shadow: None,
            glow: None,
            gradient: None,
            border: None,
            shape_layer: None,
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
        }
    }
}

impl TextFaviconSpec {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The color-adjustment slice of this spec.
    pub fn adjustment(&self) -> ColorAdjustment {
        ColorAdjustment {
            brightness: self.brightness,
            contrast: self.contrast,
            saturation: self.saturation,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the spec at `size` x `size` pixels.
pub fn render_text_favicon(
    spec: &TextFaviconSpec,
    size: u32,
) -> Result<Surface, GenerationError> {
    let size = size.max(1);
    let surface = rasterize_document(&document(spec, size), size, size)?;
    Ok(adjust(&surface, &spec.adjustment()))
}

/// Builds the SVG document for one render size.
fn document(spec: &TextFaviconSpec, size: u32) -> String {
    let s = size as f32;
    let scale = s / BASE_DESIGN_SIZE as f32;
    let radius = (spec.border_radius * scale).min(s / 2.0).max(0.0);
    let rx_attr = if radius > 0.0 {
        format!(r#" rx="{radius}""#)
    } else {
        String::new()
    };

    let mut defs = String::new();
    let mut body = String::new();

    // Background: gradient reference or resolved solid color.
    let background = match &spec.gradient {
        Some(gradient) => {
            defs.push_str(&gradient_defs("bg", gradient, s));
            Some(("url(#bg)".to_owned(), 1.0))
        }
        None => Rgba8::parse(&spec.background_color)
            .filter(|c| !c.is_transparent())
            .map(|c| (c.to_hex(), c.opacity())),
    };
    if let Some((fill, opacity)) = &background {
        body.push_str(&format!(
            r#"<rect width="{s}" height="{s}"{rx_attr} fill="{fill}" fill-opacity="{opacity}"/>"#
        ));
    }

    // Frame border, stroked outside the clip so it stays crisp at the edge.
    if let Some(border) = &spec.border {
        let width = border.width * scale;
        if width > 0.0 {
            if let Some(color) = Rgba8::parse(&border.color) {
                let stroke = format!(
                    r#"fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{width}""#,
                    color.to_hex(),
                    color.opacity()
                );
                if radius > 0.0 {
                    body.push_str(&format!(
                        r#"<rect width="{s}" height="{s}"{rx_attr} {stroke}/>"#
                    ));
                } else {
                    let inset = width / 2.0;
                    let inner = s - width;
                    body.push_str(&format!(
                        r#"<rect x="{inset}" y="{inset}" width="{inner}" height="{inner}" {stroke}/>"#
                    ));
                }
            }
        }
    }

    // Shape and text are clipped to the rounded frame.
    let clipped = radius > 0.0;
    if clipped {
        defs.push_str(&format!(
            r#"<clipPath id="frame"><rect width="{s}" height="{s}" rx="{radius}"/></clipPath>"#
        ));
        body.push_str(r#"<g clip-path="url(#frame)">"#);
    }

    if let Some(shape) = &spec.shape_layer {
        body.push_str(&shape_markup(shape, s, scale));
    }

    body.push_str(&text_markup(spec, s, scale, &mut defs));

    if clipped {
        body.push_str("</g>");
    }

    let defs = if defs.is_empty() {
        String::new()
    } else {
        format!("<defs>{defs}</defs>")
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {s} {s}">{defs}{body}</svg>"#
    )
}

/// The `<text>` element with its anchor, rotation, outline, and effects.
fn text_markup(spec: &TextFaviconSpec, s: f32, scale: f32, defs: &mut String) -> String {
    let text: String = spec.text.chars().take(MAX_TEXT_CHARS).collect();
    let text = apply_text_case(&text, spec.text_case);
    if text.is_empty() {
        return String::new();
    }

    let padding = spec.padding * scale;
    let (x, anchor) = match spec.text_align {
        TextAlign::Left => (padding, "start"),
        TextAlign::Center => (s / 2.0, "middle"),
        TextAlign::Right => (s - padding, "end"),
    };
    let y = s / 2.0;
    let fill = Rgba8::parse(&spec.text_color).unwrap_or(Rgba8::new(255, 255, 255, 255));

    let mut attrs = format!(
        r#"x="{x}" y="{y}" text-anchor="{anchor}" dominant-baseline="central" font-family="{}" font-size="{}" font-weight="{}" fill="{}" fill-opacity="{}""#,
        xml_escape(&spec.font_family),
        spec.font_size * scale,
        spec.font_weight,
        fill.to_hex(),
        fill.opacity()
    );

    if spec.letter_spacing != 0.0 {
        attrs.push_str(&format!(
            r#" letter-spacing="{}""#,
            spec.letter_spacing * scale
        ));
    }

    if spec.rotation != 0.0 {
        attrs.push_str(&format!(r#" transform="rotate({} {x} {y})""#, spec.rotation));
    }

    if let Some(outline) = &spec.outline {
        let width = outline.width * scale;
        if width > 0.0 {
            if let Some(stroke) = Rgba8::parse(&outline.color) {
                attrs.push_str(&format!(
                    r#" paint-order="stroke" stroke="{}" stroke-opacity="{}" stroke-width="{width}""#,
                    stroke.to_hex(),
                    stroke.opacity()
                ));
            }
        }
    }

    if let Some(filter) = effect_filter("fx", spec.shadow.as_ref(), spec.glow.as_ref(), scale) {
        defs.push_str(&filter);
        attrs.push_str(r#" filter="url(#fx)""#);
    }

    format!(r#"<text {attrs}>{}</text>"#, xml_escape(&text))
}

/// Shadow or glow as a drop-shadow filter; shadow wins when both are set.
/// A glow is a centered shadow with no offset. Canvas-style blur maps to a
/// Gaussian deviation of half the blur radius.
fn effect_filter(
    id: &str,
    shadow: Option<&ShadowSpec>,
    glow: Option<&GlowSpec>,
    scale: f32,
) -> Option<String> {
    let (color, blur, dx, dy) = if let Some(shadow) = shadow {
        (
            Rgba8::parse(&shadow.color).unwrap_or(Rgba8::new(0, 0, 0, 255)),
            shadow.blur,
            shadow.offset_x,
            shadow.offset_y,
        )
    } else if let Some(glow) = glow {
        (
            Rgba8::parse(&glow.color).unwrap_or(Rgba8::new(255, 255, 255, 255)),
            glow.intensity,
            0.0,
            0.0,
        )
    } else {
        return None;
    };

    Some(format!(
        r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
        dx * scale,
        dy * scale,
        blur * scale / 2.0,
        color.to_hex(),
        color.opacity()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::gradient::GradientDirection;

    #[test]
    fn case_transforms() {
        assert_eq!(apply_text_case("abC", TextCase::None), "abC");
        assert_eq!(apply_text_case("abC", TextCase::Uppercase), "ABC");
        assert_eq!(apply_text_case("AbC", TextCase::Lowercase), "abc");
        assert_eq!(apply_text_case("abc", TextCase::Capitalize), "Abc");
        assert_eq!(apply_text_case("", TextCase::Capitalize), "");
    }

    #[test]
    fn text_is_truncated_and_escaped() {
        let spec = TextFaviconSpec::default().with_text("<&>!!");
        let doc = document(&spec, 64);
        assert!(doc.contains(">&lt;&amp;&gt;</text>"));
        assert!(!doc.contains("!!"));
    }

    #[test]
    fn base_size_document_geometry() {
        let spec = TextFaviconSpec::default();
        let doc = document(&spec, 64);
        assert!(doc.contains(r#"width="64" height="64""#));
        assert!(doc.contains(r#"rx="8""#));
        assert!(doc.contains(r##"fill="#3b82f6""##));
        assert!(doc.contains(r#"text-anchor="middle""#));
        assert!(doc.contains(r#"font-size="32""#));
        assert!(doc.contains("clip-path"));
        assert!(!doc.contains("rotate"));
    }

    #[test]
    fn parameters_scale_with_output_size() {
        let spec = TextFaviconSpec {
            letter_spacing: 1.0,
            ..TextFaviconSpec::default()
        };
        let doc = document(&spec, 512);
        // 8x the base design: radius 64, font 256, spacing 8.
        assert!(doc.contains(r#"rx="64""#));
        assert!(doc.contains(r#"font-size="256""#));
        assert!(doc.contains(r#"letter-spacing="8""#));
    }

    #[test]
    fn left_alignment_anchors_at_padding() {
        let spec = TextFaviconSpec {
            text_align: TextAlign::Left,
            rotation: -5.0,
            ..TextFaviconSpec::default()
        };
        let doc = document(&spec, 64);
        assert!(doc.contains(r#"x="8" y="32" text-anchor="start""#));
        // Rotation pivots on the anchor, not the canvas center.
        assert!(doc.contains(r#"transform="rotate(-5 8 32)""#));
    }

    #[test]
    fn gradient_background_references_defs() {
        let spec = TextFaviconSpec {
            gradient: Some(GradientSpec {
                direction: GradientDirection::ToRight,
                ..GradientSpec::default()
            }),
            ..TextFaviconSpec::default()
        };
        let doc = document(&spec, 64);
        assert!(doc.contains(r#"fill="url(#bg)""#));
        assert!(doc.contains("linearGradient"));
    }

    #[test]
    fn shadow_wins_over_glow() {
        let spec = TextFaviconSpec {
            shadow: Some(ShadowSpec {
                color: "#000000".to_owned(),
                blur: 4.0,
                offset_x: 2.0,
                offset_y: 2.0,
            }),
            glow: Some(GlowSpec {
                color: "#FFFFFF".to_owned(),
                intensity: 10.0,
            }),
            ..TextFaviconSpec::default()
        };
        let doc = document(&spec, 64);
        assert!(doc.contains(r#"dx="2" dy="2" stdDeviation="2""#));
        assert_eq!(doc.matches("<filter").count(), 1);
    }

    #[test]
    fn glow_is_a_centered_blur() {
        let spec = TextFaviconSpec {
            glow: Some(GlowSpec {
                color: "#06B6D4".to_owned(),
                intensity: 10.0,
            }),
            ..TextFaviconSpec::default()
        };
        let doc = document(&spec, 64);
        assert!(doc.contains(r#"dx="0" dy="0" stdDeviation="5""#));
    }

    #[test]
    fn rendered_frame_is_rounded_and_filled() {
        let surface = render_text_favicon(&TextFaviconSpec::default(), 64).unwrap();
        assert_eq!(surface.width(), 64);
        // Corner lies outside the radius-8 frame.
        assert_eq!(surface.pixel(0, 0).3, 0);
        // Top-center is background.
        assert_eq!(surface.pixel(32, 2), (59, 130, 246, 255));
    }

    #[test]
    fn render_is_proportional_across_sizes() {
        let spec = TextFaviconSpec::default();
        let small = render_text_favicon(&spec, 64).unwrap();
        let large = render_text_favicon(&spec, 512).unwrap();
        assert_eq!(large.width(), 512);

        // Same proportional positions: clipped corner, background interior.
        assert_eq!(small.pixel(1, 1).3, 0);
        assert_eq!(large.pixel(12, 12).3, 0);
        assert_eq!(small.pixel(5, 5).3, 255);
        assert_eq!(large.pixel(40, 40).3, 255);
        assert_eq!(small.pixel(32, 2).3, 255);
        assert_eq!(large.pixel(256, 16).3, 255);
    }

    #[test]
    fn spec_serde_round_trip() {
        let spec = TextFaviconSpec {
            text_case: TextCase::Uppercase,
            gradient: Some(GradientSpec::default()),
            shape_layer: Some(ShapeLayerSpec::default()),
            ..TextFaviconSpec::default()
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"fontFamily\""));
        assert!(json.contains("\"textCase\":\"uppercase\""));
        assert!(json.contains("\"to bottom right\""));
        let restored: TextFaviconSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, spec);
    }
}
