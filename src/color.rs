//! Color parsing and the brightness/contrast/saturation engine.
//!
//! Adjustments are explicit per-pixel formulas rather than a host filter
//! string, so exact numeric output is unit-testable. All three run on the
//! unpremultiplied RGB channels with alpha untouched, sequentially on the
//! running value: brightness, then contrast, then saturation.

use resvg::tiny_skia;
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

// ============================================================================
// Rgba8
// ============================================================================

/// An unpremultiplied 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS color: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, a named
    /// color (`"rebeccapurple"`), or `"transparent"`.
    ///
    /// Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let named = palette::named::from_str(&input.to_ascii_lowercase())?;
        Some(Self::new(named.red, named.green, named.blue, 255))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let nibble = |c: u8| -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        };
        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB / #RGBA: each nibble doubles
            3 | 4 => {
                let mut ch = [0u8; 4];
                for (i, &c) in bytes.iter().enumerate() {
                    let n = nibble(c)?;
                    ch[i] = n << 4 | n;
                }
                if bytes.len() == 3 {
                    ch[3] = 255;
                }
                Some(Self::new(ch[0], ch[1], ch[2], ch[3]))
            }
            // #RRGGBB / #RRGGBBAA
            6 | 8 => {
                let mut ch = [0u8; 4];
                for (i, pair) in bytes.chunks_exact(2).enumerate() {
                    ch[i] = nibble(pair[0])? << 4 | nibble(pair[1])?;
                }
                if bytes.len() == 6 {
                    ch[3] = 255;
                }
                Some(Self::new(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Formats as `#rrggbb`, dropping alpha. Pair with [`Self::opacity`]
    /// where alpha matters (SVG attributes take opacity separately).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0-1.0 fraction.
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

// ============================================================================
// ColorAdjustment
// ============================================================================

/// Brightness/contrast/saturation percentages, where 100 means "no change".
///
/// The neutral value 100/100/100 is the default for nearly every generation
/// request, so [`adjust`] treats it as a strict no-op: the returned surface
/// is bit-identical to the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorAdjustment {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
        }
    }
}

impl ColorAdjustment {
    pub fn is_neutral(&self) -> bool {
        self.brightness == 100.0 && self.contrast == 100.0 && self.saturation == 100.0
    }
}

/// Applies the adjustment to a copy of `surface`; the input is never mutated
/// since callers may still need the original for further compositing.
pub fn adjust(surface: &Surface, adjustment: &ColorAdjustment) -> Surface {
    if adjustment.is_neutral() {
        return surface.clone();
    }

    let mut img = surface.to_rgba();
    for pixel in img.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = adjust_channels(r, g, b, adjustment);
        pixel.0 = [r, g, b, a];
    }
    Surface::from_rgba(&img)
}

/// The per-pixel formulas, applied to the running value of each channel.
fn adjust_channels(r: u8, g: u8, b: u8, adjustment: &ColorAdjustment) -> (u8, u8, u8) {
    let mut r = f32::from(r);
    let mut g = f32::from(g);
    let mut b = f32::from(b);

    if adjustment.brightness != 100.0 {
        let offset = (adjustment.brightness - 100.0) * 2.55;
        r = (r + offset).clamp(0.0, 255.0);
        g = (g + offset).clamp(0.0, 255.0);
        b = (b + offset).clamp(0.0, 255.0);
    }

    if adjustment.contrast != 100.0 {
        let factor = (adjustment.contrast / 100.0).powi(2);
        r = ((r - 128.0) * factor + 128.0).clamp(0.0, 255.0);
        g = ((g - 128.0) * factor + 128.0).clamp(0.0, 255.0);
        b = ((b - 128.0) * factor + 128.0).clamp(0.0, 255.0);
    }

    if adjustment.saturation != 100.0 {
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;
        let factor = adjustment.saturation / 100.0;
        r = (gray + factor * (r - gray)).clamp(0.0, 255.0);
        g = (gray + factor * (g - gray)).clamp(0.0, 255.0);
        b = (gray + factor * (b - gray)).clamp(0.0, 255.0);
    }

    (r.round() as u8, g.round() as u8, b.round() as u8)
}
