mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::PubAtlasApp;
use eframe::egui;
use pub_atlas::config::DEFAULT_DATA_FILE;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional positional argument: the pub CSV to open at start-up.
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut state = AppState::default();
    state.load_path(&path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "London Pubs",
        options,
        Box::new(|_cc| Ok(Box::new(PubAtlasApp::new(state)))),
    )
}
