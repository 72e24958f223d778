use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// Golden angle in degrees.
const HUE_STEP: f32 = 137.508;
const HUE_START: f32 = 210.0;

/// `n` colours for categorical data. Hues advance by the golden angle and
/// lightness alternates between neighbours.
pub fn category_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (HUE_START + i as f32 * HUE_STEP) % 360.0;
            let lightness = if i % 2 == 0 { 0.48 } else { 0.62 };
            let rgb: Srgb = Hsl::new(hue, 0.70, lightness).into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome colours
// ---------------------------------------------------------------------------

/// Maps every mission outcome of the dataset to a distinct colour.
///
/// Built once from the whole table so an outcome keeps its colour in both
/// charts whatever the current filter.
#[derive(Debug, Clone)]
pub struct OutcomeColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl OutcomeColors {
    pub fn new<'a>(outcomes: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: std::collections::BTreeSet<&str> = outcomes.into_iter().collect();
        let palette = category_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(outcome, color)| (outcome.to_string(), color))
            .collect();

        OutcomeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, outcome: &str) -> Color32 {
        self.mapping
            .get(outcome)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Position of the outcome along the scatter chart's category axis.
    pub fn index_of(&self, outcome: &str) -> Option<usize> {
        self.mapping.keys().position(|k| k == outcome)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &str> {
        self.mapping.keys().map(String::as_str)
    }
}
