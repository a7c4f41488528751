//! Render configuration value objects.
//!
//! Options are immutable values passed explicitly into each pipeline call,
//! never ambient state, so a render always sees exactly the configuration it
//! was invoked with. Colors are kept as the caller's CSS strings and parsed
//! at the point of use; an unparseable color degrades to "absent" rather
//! than failing the render.

use serde::{Deserialize, Serialize};

use crate::color::{ColorAdjustment, Rgba8};

// ============================================================================
// OutputFormat
// ============================================================================

/// Encodable artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Webp,
    Ico,
    Jpeg,
}

impl OutputFormat {
    /// The filename extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Ico => "ico",
            Self::Jpeg => "jpeg",
        }
    }

    /// The IANA media type, as used in manifest icon entries.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Ico => "image/x-icon",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// CropRegion
// ============================================================================

/// A crop rectangle in source-image coordinates with an optional rounded
/// corner applied to the extracted region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner radius of the extracted region; capped at half the smaller
    /// crop dimension when applied.
    #[serde(default)]
    pub corner_radius: f32,
}

impl CropRegion {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
        }
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// A corner radius at (or within epsilon of) half the smaller dimension
    /// reads as a full circle; the compositor then forces the final frame to
    /// a circle regardless of any separately requested frame radius.
    pub fn is_effectively_circular(&self) -> bool {
        self.corner_radius >= self.width.min(self.height) / 2.0 - 0.01
    }
}

// ============================================================================
// Border / effects
// ============================================================================

/// A stroked border around the final output frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderSpec {
    pub color: String,
    pub width: f32,
}

impl BorderSpec {
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Drop-shadow parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSpec {
    pub color: String,
    pub blur: f32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
}

/// Centered glow parameters (a blur with no offset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowSpec {
    pub color: String,
    pub intensity: f32,
}

/// Optional effect toggles carried alongside the geometric options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<GlowSpec>,
}

// ============================================================================
// RenderOptions
// ============================================================================

/// Configuration for one generation request over an uploaded source image.
///
/// Re-created per request; compared by value only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Fill behind the composed content. `None` or `"transparent"` leaves
    /// the canvas transparent.
    pub background_color: Option<String>,

    /// Border stroked around the output frame.
    pub border: Option<BorderSpec>,

    /// Corner radius of the final output frame, in output pixels.
    pub border_radius: f32,

    /// Percentages where 100 = no change.
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,

    /// Encoder quality, 0.0-1.0. Applies to lossy formats (JPEG); PNG and
    /// the lossless WebP encoder ignore it.
    pub quality: f32,

    pub format: OutputFormat,

    /// Region of the source to extract before scaling.
    pub crop: Option<CropRegion>,

    pub effects: EffectOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background_color: None,
            border: None,
            border_radius: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            quality: 0.9,
            format: OutputFormat::Png,
            crop: None,
            effects: EffectOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_border(mut self, border: BorderSpec) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_crop(mut self, crop: CropRegion) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// The color-adjustment slice of these options.
    pub fn adjustment(&self) -> ColorAdjustment {
        ColorAdjustment {
            brightness: self.brightness,
            contrast: self.contrast,
            saturation: self.saturation,
        }
    }

    /// Resolves the background to a drawable color, treating `"transparent"`
    /// and unparseable values as no background.
    pub(crate) fn background(&self) -> Option<Rgba8> {
        self.background_color
            .as_deref()
            .and_then(Rgba8::parse)
            .filter(|c| !c.is_transparent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let options = RenderOptions::default();
        assert!(options.adjustment().is_neutral());
        assert_eq!(options.format, OutputFormat::Png);
        assert_eq!(options.quality, 0.9);
        assert!(options.background().is_none());
    }

    #[test]
    fn transparent_background_resolves_to_none() {
        let options = RenderOptions::default().with_background("transparent");
        assert!(options.background().is_none());

        let options = RenderOptions::default().with_background("#FFFFFF");
        assert_eq!(options.background(), Some(Rgba8::new(255, 255, 255, 255)));

        let options = RenderOptions::default().with_background("no-such-color");
        assert!(options.background().is_none());
    }

    #[test]
    fn circular_crop_detection() {
        assert!(CropRegion::new(0.0, 0.0, 50.0, 50.0)
            .with_corner_radius(25.0)
            .is_effectively_circular());
        // Within the epsilon
        assert!(CropRegion::new(0.0, 0.0, 50.0, 50.0)
            .with_corner_radius(24.995)
            .is_effectively_circular());
        assert!(!CropRegion::new(0.0, 0.0, 50.0, 50.0)
            .with_corner_radius(10.0)
            .is_effectively_circular());
        // Minimum dimension governs
        assert!(!CropRegion::new(0.0, 0.0, 50.0, 100.0)
            .with_corner_radius(30.0)
            .is_effectively_circular());
    }

    #[test]
    fn options_serialize_camel_case() {
        let options = RenderOptions::default()
            .with_background("#3B82F6")
            .with_crop(CropRegion::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"borderRadius\""));
        assert!(json.contains("\"cornerRadius\""));
        assert!(json.contains("\"png\""));

        let restored: RenderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, options);
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Ico.media_type(), "image/x-icon");
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpeg");
    }
}
