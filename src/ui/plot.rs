use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::anomaly::forest::Label;
use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Detection scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the detection scatter in the central panel.
pub fn detection_plot(ui: &mut Ui, state: &AppState) {
    if state.points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No points loaded  (File → Open… or Regenerate)");
        });
        return;
    }

    let plot = Plot::new("detection_plot")
        .legend(Legend::default())
        .x_axis_label("Feature 1")
        .y_axis_label("Feature 2")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    plot.show(ui, |plot_ui| {
        let Some(detection) = &state.detection else {
            // No fit yet: one gray cloud.
            let pts: PlotPoints = state.points.iter().map(|p| [p[0], p[1]]).collect();
            plot_ui.points(
                Points::new(pts)
                    .name("Points")
                    .radius(2.5)
                    .shape(MarkerShape::Circle),
            );
            return;
        };

        if state.color_by_score {
            // Per-point gradient needs one marker group per point; fine at
            // demo scale.
            let min = detection.scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = detection
                .scores
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let range = (max - min).max(f64::EPSILON);
            for (point, &score) in state.points.iter().zip(&detection.scores) {
                let t = (score - min) / range;
                plot_ui.points(
                    Points::new(vec![[point[0], point[1]]])
                        .color(color::score_color(t))
                        .radius(2.5)
                        .shape(MarkerShape::Circle),
                );
            }
            return;
        }

        for label in [Label::Normal, Label::Anomaly] {
            let pts: PlotPoints = state
                .points
                .iter()
                .zip(&detection.labels)
                .filter(|(_, &l)| l == label)
                .map(|(p, _)| [p[0], p[1]])
                .collect();
            let name = match label {
                Label::Normal => "Normal",
                Label::Anomaly => "Anomaly",
            };
            plot_ui.points(
                Points::new(pts)
                    .name(name)
                    .color(color::label_color(label))
                    .radius(2.5)
                    .shape(MarkerShape::Circle),
            );
        }
    });
}
