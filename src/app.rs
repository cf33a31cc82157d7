use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DatalabApp {
    pub state: AppState,
}

impl Default for DatalabApp {
    fn default() -> Self {
        Self {
            state: AppState::with_demo_data(),
        }
    }
}

impl eframe::App for DatalabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: detector controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::detection_plot(ui, &self.state);
        });
    }
}
