mod address_dialog;
mod app;
mod cli;
mod dialogs;
mod job;

use anyhow::{Result, anyhow};
use app::AssistantApp;
use clap::Parser;
use cli::Args;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = args.config();
    info!(apk_dir = %config.apk_dir.display(), adb_server = %config.adb_server, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BYD ADB Assistant")
            .with_inner_size([500.0, 240.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "BYD ADB Assistant",
        options,
        Box::new(move |_cc| Ok(Box::new(AssistantApp::new(config)))),
    )
    .map_err(|e| anyhow!("failed to open the window: {e}"))
}
