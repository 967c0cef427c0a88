use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::EmgConfig;
use crate::state::AppState;

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
            if ui.button("Load layout…").clicked() {
                open_layout_dialog(state);
                ui.close_menu();
            }
            let can_reload = state.source.is_some();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                if let Some(path) = state.source.clone() {
                    state.reload(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(fig), Some(source)) = (&state.figure, &state.source) {
            let rows = fig
                .subplots
                .iter()
                .flat_map(|s| s.traces.iter())
                .map(|t| t.series.len())
                .max()
                .unwrap_or(0);
            ui.label(format!("{rows} rows from {}", source.display()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open EMG data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.reload(&path);
    }
}

/// Rebuild from the layout's own `data_path`; the layout is kept only if that succeeds.
pub fn open_layout_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load layout")
        .add_filter("JSON", &["json"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match EmgConfig::from_json_file(&path) {
        Ok(config) => {
            log::info!("Loaded layout from {}", path.display());
            let data_path = config.data_path.clone();
            state.load_with(config, &data_path);
        }
        Err(e) => {
            log::error!("Failed to load layout: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
