use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings_from, DEFAULT_SETTINGS_FILE};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::GalleryApp;

#[derive(Parser, Debug)]
#[command(name = "artbase-gui", about = "Art Base One gallery window")]
struct Args {
    /// API base URL; relative values resolve against --origin.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    #[arg(long)]
    artworks_path: Option<String>,
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config);
    if let Some(v) = args.api_url {
        settings.api_base = v;
    }
    if let Some(v) = args.origin {
        settings.origin = v;
    }
    if let Some(v) = args.artworks_path {
        settings.artworks_path = v;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Art Base One")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Art Base One",
        options,
        Box::new(|_cc| Ok(Box::new(GalleryApp::bootstrap(cmd_tx, ui_rx)))),
    )
}
