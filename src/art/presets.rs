//! Preset styles.
//!
//! Every preset is a complete, fully-specified [`TextFaviconSpec`] built on
//! top of the defaults, never a partial dictionary merged into existing
//! state, so applying a preset always produces the same composition
//! regardless of what the user customized before.

use crate::options::{GlowSpec, ShadowSpec};

use super::gradient::GradientSpec;
use super::text::{OutlineSpec, TextCase, TextFaviconSpec};

/// A named, ready-to-render style.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePreset {
    pub name: &'static str,
    pub spec: TextFaviconSpec,
}

fn shadow(color: &str, blur: f32, offset_x: f32, offset_y: f32) -> Option<ShadowSpec> {
    Some(ShadowSpec {
        color: color.to_owned(),
        blur,
        offset_x,
        offset_y,
    })
}

fn gradient(start: &str, end: &str) -> Option<GradientSpec> {
    Some(GradientSpec {
        start: start.to_owned(),
        end: end.to_owned(),
        ..GradientSpec::default()
    })
}

/// The built-in style catalog. Each entry keeps the default text ("A");
/// callers typically swap in their own via
/// [`with_text`](TextFaviconSpec::with_text).
pub fn preset_styles() -> Vec<StylePreset> {
    let base = TextFaviconSpec::default;
    vec![
        StylePreset {
            name: "Modern Blue",
            spec: TextFaviconSpec {
                gradient: gradient("#3B82F6", "#1D4ED8"),
                ..base()
            },
        },
        StylePreset {
            name: "Elegant Dark",
            spec: TextFaviconSpec {
                background_color: "#1F2937".to_owned(),
                text_color: "#F9FAFB".to_owned(),
                font_family: "Georgia".to_owned(),
                font_weight: 400,
                shadow: shadow("#000000", 4.0, 2.0, 2.0),
                ..base()
            },
        },
        StylePreset {
            name: "Vibrant Orange",
            spec: TextFaviconSpec {
                background_color: "#F97316".to_owned(),
                font_family: "Impact".to_owned(),
                gradient: gradient("#F97316", "#EA580C"),
                ..base()
            },
        },
        StylePreset {
            name: "Clean White",
            spec: TextFaviconSpec {
                background_color: "#FFFFFF".to_owned(),
                text_color: "#1F2937".to_owned(),
                font_family: "Helvetica".to_owned(),
                font_weight: 600,
                shadow: shadow("#00000020", 4.0, 2.0, 2.0),
                ..base()
            },
        },
        StylePreset {
            name: "Tech Green",
            spec: TextFaviconSpec {
                background_color: "#10B981".to_owned(),
                font_family: "Courier New".to_owned(),
                gradient: gradient("#10B981", "#059669"),
                ..base()
            },
        },
        StylePreset {
            name: "Purple Gradient",
            spec: TextFaviconSpec {
                background_color: "#8B5CF6".to_owned(),
                font_family: "Trebuchet MS".to_owned(),
                font_weight: 600,
                gradient: gradient("#8B5CF6", "#7C3AED"),
                ..base()
            },
        },
        StylePreset {
            name: "Minimalist Gray",
            spec: TextFaviconSpec {
                background_color: "#E5E7EB".to_owned(),
                text_color: "#4B5563".to_owned(),
                font_family: "Open Sans".to_owned(),
                font_weight: 300,
                letter_spacing: 1.0,
                ..base()
            },
        },
        StylePreset {
            name: "Bold Red Impact",
            spec: TextFaviconSpec {
                background_color: "#DC2626".to_owned(),
                font_family: "Impact".to_owned(),
                font_weight: 900,
                text_case: TextCase::Uppercase,
                letter_spacing: -1.0,
                ..base()
            },
        },
        StylePreset {
            name: "Futuristic Cyan",
            spec: TextFaviconSpec {
                background_color: "#083344".to_owned(),
                text_color: "#06B6D4".to_owned(),
                font_family: "Source Code Pro".to_owned(),
                font_weight: 600,
                letter_spacing: 0.5,
                glow: Some(GlowSpec {
                    color: "#06B6D4".to_owned(),
                    intensity: 10.0,
                }),
                ..base()
            },
        },
        StylePreset {
            name: "Playful Pink",
            spec: TextFaviconSpec {
                background_color: "#FBCFE8".to_owned(),
                text_color: "#9D174D".to_owned(),
                font_family: "Comic Sans MS".to_owned(),
                border_radius: 32.0,
                rotation: 5.0,
                ..base()
            },
        },
        StylePreset {
            name: "Charcoal Outline",
            spec: TextFaviconSpec {
                background_color: "#FFFFFF".to_owned(),
                text_color: "#374151".to_owned(),
                font_family: "Lato".to_owned(),
                letter_spacing: 0.5,
                outline: Some(OutlineSpec {
                    color: "#374151".to_owned(),
                    width: 1.0,
                }),
                ..base()
            },
        },
        StylePreset {
            name: "Monochrome Minimal",
            spec: TextFaviconSpec {
                background_color: "#000000".to_owned(),
                font_family: "Helvetica".to_owned(),
                font_weight: 400,
                letter_spacing: 2.0,
                text_case: TextCase::Uppercase,
                ..base()
            },
        },
    ]
}

/// Looks up a preset by its display name.
pub fn find_preset(name: &str) -> Option<StylePreset> {
    preset_styles().into_iter().find(|p| p.name == name)
}
