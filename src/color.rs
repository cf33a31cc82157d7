use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::anomaly::forest::Label;

// ---------------------------------------------------------------------------
// Colors for detection plots
// ---------------------------------------------------------------------------

/// Hue endpoints of the score gradient (blue → red).
const NORMAL_HUE: f32 = 220.0;
const ANOMALY_HUE: f32 = 0.0;

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Flat per-class color: blue for normal points, red for anomalies.
pub fn label_color(label: Label) -> Color32 {
    match label {
        Label::Normal => hsl_to_color32(NORMAL_HUE),
        Label::Anomaly => hsl_to_color32(ANOMALY_HUE),
    }
}

/// Continuous color for a score position `t` in [0, 1], where 0 is the most
/// anomalous score seen and 1 the most normal. Sweeps red → blue.
pub fn score_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(ANOMALY_HUE + t * (NORMAL_HUE - ANOMALY_HUE))
}

/// Legend entries (class label → color) for the UI.
pub fn legend_entries() -> Vec<(String, Color32)> {
    vec![
        ("Normal".to_string(), label_color(Label::Normal)),
        ("Anomaly".to_string(), label_color(Label::Anomaly)),
    ]
}
