mod app;
mod color;
mod config;
mod data;
mod figure;
mod state;
mod ui;

use anyhow::anyhow;
use app::EmgViewerApp;
use config::EmgConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = EmgConfig::default();
    let path = config.data_path.clone();
    let figure = figure::load_figure(&config, &path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([figure.width, figure.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = figure.title.clone();
    let mut state = AppState::new(config);
    state.set_figure(figure, path);

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(EmgViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer exited with an error: {e}"))
}
