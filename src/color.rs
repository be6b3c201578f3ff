use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour for answer rank `rank` on a scale of `n` answers.  Indexed by rank
/// rather than by observed labels so a series keeps its colour when another
/// answer is missing from the data.
pub fn rank_color(rank: usize, n: usize) -> Color32 {
    generate_palette(n)
        .get(rank)
        .copied()
        .unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Color mapping: group value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a grouping column (e.g. sex) to colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the column's distinct values.
    pub fn new<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let values: Vec<&CellValue> = values.into_iter().collect();
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<CellValue, Color32> = values
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
