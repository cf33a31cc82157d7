use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – detector controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Detector");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut changed = false;

            ui.strong("Contamination");
            changed |= ui
                .add(egui::Slider::new(&mut state.contamination, 0.01..=0.5))
                .changed();
            ui.add_space(4.0);

            ui.strong("Trees");
            changed |= ui
                .add(egui::DragValue::new(&mut state.trees).range(10..=500))
                .changed();
            ui.add_space(4.0);

            ui.strong("Seed");
            let seed_changed = ui.add(egui::DragValue::new(&mut state.seed)).changed();
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Regenerate").clicked() {
                    state.regenerate();
                }
                if ui.button("Re-fit").clicked() {
                    state.refit();
                }
            });

            // Parameter edits refit the current points; a new seed regrows
            // the cloud itself.
            if seed_changed {
                state.regenerate();
            } else if changed {
                state.refit();
            }

            ui.separator();
            ui.checkbox(&mut state.color_by_score, "Color by score");

            ui.separator();
            ui.strong("Legend");
            for (name, color) in color::legend_entries() {
                ui.label(RichText::new(name).color(color));
            }

            if let Some(detection) = &state.detection {
                ui.separator();
                ui.label(format!("threshold: {:.4}", detection.threshold));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let (normal, anomalous) = state.counts();
        ui.label(format!(
            "{} points, {normal} normal, {anomalous} anomalous",
            state.points.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open point data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_points(&path) {
            Ok(points) => {
                log::info!("Loaded {} points from {}", points.len(), path.display());
                state.set_points(points);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
