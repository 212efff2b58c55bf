use std::sync::Arc;

use eframe::egui;

use rusty_eda::analysis::Report;
use rusty_eda::data::Dataset;

use crate::state::AppState;
use crate::ui::{multivariate, panels, univariate};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyEdaApp {
    pub state: AppState,
}

impl RustyEdaApp {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for RustyEdaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Univariate and Multivariate Data Analysis");
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &self.state.output {
                    Some(Report::Univariate(report)) => univariate::show(ui, report),
                    Some(Report::Multivariate(report)) => multivariate::show(ui, report),
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Nothing to show for this selection.");
                        });
                    }
                });
        });
    }
}
