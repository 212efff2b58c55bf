use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Group colours: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the groups of the hue column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the ordered group names.
    pub fn new(groups: &[String]) -> Self {
        let mapping = groups
            .iter()
            .cloned()
            .zip(generate_palette(groups.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group; unknown or missing groups are grey.
    pub fn color_for(&self, group: Option<&str>) -> Color32 {
        group
            .and_then(|g| self.mapping.get(g))
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging map for the correlation heatmap
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Blue → grey → red for values in `[-1, 1]`. NaN renders neutral.
pub fn coolwarm(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::from_rgb(NEUTRAL.0, NEUTRAL.1, NEUTRAL.2);
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let (from, to, factor) = if t < 0.0 {
        (COOL, NEUTRAL, t + 1.0)
    } else {
        (NEUTRAL, WARM, t)
    };
    let mixed = linear(from).mix(linear(to), factor);
    to_color32(mixed.into_color())
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_color()
}

/// Text colour readable on top of `coolwarm(value)`.
pub fn contrast_text(value: f64) -> Color32 {
    if value.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
    }

    #[test]
    fn unknown_group_falls_back_to_grey() {
        let cm = ColorMap::new(&["a".to_string(), "b".to_string()]);
        assert_ne!(cm.color_for(Some("a")), Color32::GRAY);
        assert_eq!(cm.color_for(Some("zzz")), Color32::GRAY);
        assert_eq!(cm.color_for(None), Color32::GRAY);
    }

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), Color32::from_rgb(COOL.0, COOL.1, COOL.2));
        assert_eq!(coolwarm(0.0), Color32::from_rgb(NEUTRAL.0, NEUTRAL.1, NEUTRAL.2));
        assert_eq!(coolwarm(1.0), Color32::from_rgb(WARM.0, WARM.1, WARM.2));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.0));
    }
}
