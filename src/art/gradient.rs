//! Background gradient math.
//!
//! One canonical, symmetric mapping from a CSS-style direction to gradient
//! line coordinates, shared by every render size. Named directions run
//! edge-to-edge (cardinals) or corner-to-corner (diagonals); angle
//! directions run through the center of the square, extended a full
//! half-diagonal each way so the gradient spans the square at any angle;
//! radial gradients span center to half-size.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;

use super::xml_escape;

// ============================================================================
// GradientDirection
// ============================================================================

/// Direction of a background gradient.
///
/// Serializes as its CSS form: `"to right"`, `"to bottom left"`, `"45deg"`,
/// `"radial"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GradientDirection {
    ToRight,
    ToLeft,
    ToBottom,
    ToTop,
    ToBottomRight,
    ToBottomLeft,
    ToTopRight,
    ToTopLeft,
    /// Clockwise from the positive x axis, in degrees.
    Angle(f32),
    Radial,
}

impl Default for GradientDirection {
    fn default() -> Self {
        Self::ToBottomRight
    }
}

impl std::fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToRight => f.write_str("to right"),
            Self::ToLeft => f.write_str("to left"),
            Self::ToBottom => f.write_str("to bottom"),
            Self::ToTop => f.write_str("to top"),
            Self::ToBottomRight => f.write_str("to bottom right"),
            Self::ToBottomLeft => f.write_str("to bottom left"),
            Self::ToTopRight => f.write_str("to top right"),
            Self::ToTopLeft => f.write_str("to top left"),
            Self::Angle(deg) => write!(f, "{deg}deg"),
            Self::Radial => f.write_str("radial"),
        }
    }
}

impl std::str::FromStr for GradientDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "to right" => Ok(Self::ToRight),
            "to left" => Ok(Self::ToLeft),
            "to bottom" => Ok(Self::ToBottom),
            "to top" => Ok(Self::ToTop),
            "to bottom right" => Ok(Self::ToBottomRight),
            "to bottom left" => Ok(Self::ToBottomLeft),
            "to top right" => Ok(Self::ToTopRight),
            "to top left" => Ok(Self::ToTopLeft),
            "radial" => Ok(Self::Radial),
            other => match other.strip_suffix("deg") {
                Some(deg) => deg
                    .trim()
                    .parse::<f32>()
                    .map(Self::Angle)
                    .map_err(|_| format!("invalid gradient angle: {other:?}")),
                None => Err(format!("unknown gradient direction: {other:?}")),
            },
        }
    }
}

impl From<GradientDirection> for String {
    fn from(direction: GradientDirection) -> Self {
        direction.to_string()
    }
}

impl TryFrom<String> for GradientDirection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Start/end coordinates of the gradient line for a `size` x `size` square.
///
/// Returns `None` for [`GradientDirection::Radial`], which has no line.
pub fn linear_endpoints(
    direction: GradientDirection,
    size: f32,
) -> Option<((f32, f32), (f32, f32))> {
    let s = size;
    let line = match direction {
        GradientDirection::ToRight => ((0.0, 0.0), (s, 0.0)),
        GradientDirection::ToLeft => ((s, 0.0), (0.0, 0.0)),
        GradientDirection::ToBottom => ((0.0, 0.0), (0.0, s)),
        GradientDirection::ToTop => ((0.0, s), (0.0, 0.0)),
        GradientDirection::ToBottomRight => ((0.0, 0.0), (s, s)),
        GradientDirection::ToBottomLeft => ((s, 0.0), (0.0, s)),
        GradientDirection::ToTopRight => ((0.0, s), (s, 0.0)),
        GradientDirection::ToTopLeft => ((s, s), (0.0, 0.0)),
        GradientDirection::Angle(deg) => {
            let rad = deg.to_radians();
            let center = s / 2.0;
            let reach = s * std::f32::consts::SQRT_2 / 2.0;
            let (dx, dy) = (reach * rad.cos(), reach * rad.sin());
            ((center - dx, center - dy), (center + dx, center + dy))
        }
        GradientDirection::Radial => return None,
    };
    Some(line)
}

// ============================================================================
// GradientSpec
// ============================================================================

/// A two-stop background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientSpec {
    pub start: String,
    pub end: String,
    pub direction: GradientDirection,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            start: "#3B82F6".to_owned(),
            end: "#1D4ED8".to_owned(),
            direction: GradientDirection::default(),
        }
    }
}

/// The `<defs>` entry for a gradient, with coordinates resolved in user
/// space for a `size` x `size` square.
pub(crate) fn gradient_defs(id: &str, spec: &GradientSpec, size: f32) -> String {
    let start = Rgba8::parse(&spec.start).unwrap_or(Rgba8::new(0, 0, 0, 255));
    let end = Rgba8::parse(&spec.end).unwrap_or(Rgba8::new(0, 0, 0, 255));
    let stops = format!(
        r#"<stop offset="0" stop-color="{}" stop-opacity="{}"/><stop offset="1" stop-color="{}" stop-opacity="{}"/>"#,
        start.to_hex(),
        start.opacity(),
        end.to_hex(),
        end.opacity()
    );

    match linear_endpoints(spec.direction, size) {
        Some(((x1, y1), (x2, y2))) => format!(
            r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">{stops}</linearGradient>"#,
            xml_escape(id)
        ),
        None => {
            let center = size / 2.0;
            format!(
                r#"<radialGradient id="{}" gradientUnits="userSpaceOnUse" cx="{center}" cy="{center}" r="{center}">{stops}</radialGradient>"#,
                xml_escape(id)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_directions_run_edge_to_edge() {
        assert_eq!(
            linear_endpoints(GradientDirection::ToRight, 64.0),
            Some(((0.0, 0.0), (64.0, 0.0)))
        );
        assert_eq!(
            linear_endpoints(GradientDirection::ToTop, 64.0),
            Some(((0.0, 64.0), (0.0, 0.0)))
        );
    }

    #[test]
    fn diagonals_run_corner_to_corner() {
        assert_eq!(
            linear_endpoints(GradientDirection::ToBottomLeft, 10.0),
            Some(((10.0, 0.0), (0.0, 10.0)))
        );
        assert_eq!(
            linear_endpoints(GradientDirection::ToTopRight, 10.0),
            Some(((0.0, 10.0), (10.0, 0.0)))
        );
    }

    #[test]
    fn opposite_directions_mirror_each_other() {
        let ((a0, a1), (a2, a3)) =
            linear_endpoints(GradientDirection::ToBottomRight, 32.0).unwrap();
        let ((b0, b1), (b2, b3)) =
            linear_endpoints(GradientDirection::ToTopLeft, 32.0).unwrap();
        assert_eq!((a0, a1), (b2, b3));
        assert_eq!((a2, a3), (b0, b1));
    }

    #[test]
    fn angle_spans_the_half_diagonal_through_center() {
        let ((x1, y1), (x2, y2)) = linear_endpoints(GradientDirection::Angle(0.0), 64.0).unwrap();
        let reach = 64.0 * std::f32::consts::SQRT_2 / 2.0;
        assert!((x1 - (32.0 - reach)).abs() < 1e-4);
        assert!((x2 - (32.0 + reach)).abs() < 1e-4);
        assert!((y1 - 32.0).abs() < 1e-4);
        assert!((y2 - 32.0).abs() < 1e-4);

        // 90 degrees rotates the same line onto the y axis.
        let ((x1, y1), (x2, y2)) = linear_endpoints(GradientDirection::Angle(90.0), 64.0).unwrap();
        assert!((x1 - 32.0).abs() < 1e-3);
        assert!((x2 - 32.0).abs() < 1e-3);
        assert!((y1 - (32.0 - reach)).abs() < 1e-3);
        assert!((y2 - (32.0 + reach)).abs() < 1e-3);
    }

    #[test]
    fn direction_round_trips_through_css_form() {
        for direction in [
            GradientDirection::ToRight,
            GradientDirection::ToBottomLeft,
            GradientDirection::Angle(45.0),
            GradientDirection::Radial,
        ] {
            let css = direction.to_string();
            assert_eq!(css.parse::<GradientDirection>().unwrap(), direction);
        }
        assert!("sideways".parse::<GradientDirection>().is_err());
        assert_eq!(
            "135deg".parse::<GradientDirection>().unwrap(),
            GradientDirection::Angle(135.0)
        );
    }

    #[test]
    fn radial_defs_center_on_the_square() {
        let spec = GradientSpec {
            direction: GradientDirection::Radial,
            ..GradientSpec::default()
        };
        let defs = gradient_defs("bg", &spec, 64.0);
        assert!(defs.contains("radialGradient"));
        assert!(defs.contains(r#"cx="32" cy="32" r="32""#));
    }

    #[test]
    fn linear_defs_embed_resolved_stops() {
        let spec = GradientSpec {
            start: "#102030".to_owned(),
            end: "#405060".to_owned(),
            direction: GradientDirection::ToRight,
        };
        let defs = gradient_defs("bg", &spec, 64.0);
        assert!(defs.contains(r#"x1="0" y1="0" x2="64" y2="0""#));
        assert!(defs.contains("#102030"));
        assert!(defs.contains("#405060"));
    }
}
