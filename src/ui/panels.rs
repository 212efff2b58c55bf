use eframe::egui::{self, Color32, RichText, Ui};

use rusty_eda::analysis::ViewMode;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – view controls
// ---------------------------------------------------------------------------

/// Render the sidebar: analysis type, then the column picker when relevant.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ui.strong("Select Analysis Type");
    let mut mode = state.mode;
    egui::ComboBox::from_id_salt("analysis_type")
        .selected_text(mode.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ViewMode::ALL {
                ui.selectable_value(&mut mode, option, option.label());
            }
        });
    state.set_mode(mode);

    if state.mode == ViewMode::Univariate {
        ui.add_space(8.0);
        column_picker(ui, state);
    }
}

fn column_picker(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select a numerical column");

    let columns = state.numeric_columns();
    if columns.is_empty() {
        ui.label("No numeric columns.");
        return;
    }

    let current = state.selected_column.clone().unwrap_or_default();
    let mut picked = None;
    egui::ComboBox::from_id_salt("numeric_column")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    picked = Some(col.clone());
                }
            }
        });

    if let Some(col) = picked {
        state.select_column(&col);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(state.output.is_some(), egui::Button::new("Export report…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        let ds = &state.dataset;
        ui.label(format!(
            "{}: {} records, {} numeric columns",
            ds.name,
            ds.len(),
            ds.numeric_column_names().len()
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

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export analysis report")
        .add_filter("JSON", &["json"])
        .set_file_name(format!("{}-{}.json", state.dataset.name, state.mode.label().to_lowercase()))
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_report(&path) {
            log::error!("Failed to export report: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
