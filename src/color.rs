use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::charts::Rgba;
use crate::data::model::PackageTable;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, c.3)
}

// ---------------------------------------------------------------------------
// Carrier → Color32
// ---------------------------------------------------------------------------

/// Stable colour per carrier, so the bar and pie charts agree.
#[derive(Debug, Clone, Default)]
pub struct CarrierColors {
    mapping: BTreeMap<String, Color32>,
}

impl CarrierColors {
    /// Assign palette colours to carriers in name order.
    pub fn new(table: &PackageTable) -> Self {
        let mut carriers: Vec<&str> = table.records.iter().map(|r| r.carrier.as_str()).collect();
        carriers.sort_unstable();
        carriers.dedup();

        let mapping = carriers
            .iter()
            .zip(generate_palette(carriers.len()))
            .map(|(c, color)| (c.to_string(), color))
            .collect();
        CarrierColors { mapping }
    }

    pub fn color_for(&self, carrier: &str) -> Color32 {
        self.mapping.get(carrier).copied().unwrap_or(Color32::GRAY)
    }
}
