mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::RustyEdaApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Without data there is nothing to render.
    let dataset = rusty_eda::data::load_data().context("loading sample dataset")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty EDA – Univariate & Multivariate Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyEdaApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
