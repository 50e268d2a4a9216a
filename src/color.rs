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
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Color mapping: state name → Color32
// ---------------------------------------------------------------------------

/// Assigns each state a stable bar colour for the comparison chart.
#[derive(Debug, Clone)]
pub struct StateColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl StateColors {
    /// Build the map from the table's sorted distinct state names.
    pub fn new(states: &[String]) -> Self {
        let palette = generate_palette(states.len());
        let mapping = states
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        StateColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a state, grey for anything unknown.
    pub fn color_for(&self, state: &str) -> Color32 {
        self.mapping
            .get(state)
            .copied()
            .unwrap_or(self.default_color)
    }
}
