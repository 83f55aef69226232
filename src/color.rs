use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.55, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: authority → Color32
// ---------------------------------------------------------------------------

/// Gives each authority a stable colour for bars and map points.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the (sorted) authority names.
    pub fn new(authorities: &[String]) -> Self {
        let palette = generate_palette(authorities.len());
        let mapping = authorities.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            // "darkseagreen", also used for the placeholder bars
            default_color: Color32::from_rgb(143, 188, 143),
        }
    }

    /// Look up the colour for an authority.
    pub fn color_for(&self, authority: &str) -> Color32 {
        self.mapping
            .get(authority)
            .copied()
            .unwrap_or(self.default_color)
    }
}
