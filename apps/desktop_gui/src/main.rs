mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Debug, Parser)]
#[command(name = "cinenote", about = "Random movie card with visitor reviews")]
struct Args {
    /// Base URL of the movie API.
    #[arg(long, default_value = cinenote_core::DEFAULT_API_BASE_URL)]
    api_base_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::spawn_backend_worker(args.api_base_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CinéNote")
            .with_inner_size([720.0, 920.0])
            .with_min_inner_size([520.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CinéNote",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::CineNoteApp::new(cmd_tx, ui_rx)))),
    )
}
