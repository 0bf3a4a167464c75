use anyhow::Result;
use clap::Parser;
use eframe::egui;
use log::info;

use seqline::app::SeqlineApp;
use seqline::cli::Args;
use seqline::paths::{self, PathConfig};
use seqline::theme::Theme;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level())
        .init();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = paths::ensure_dirs(&path_config) {
        // Not fatal: the editor runs fine without persisted settings
        log::warn!("{:#}", e);
    }

    let theme_path = args
        .theme
        .clone()
        .unwrap_or_else(|| paths::config_file("seqline_theme.json", &path_config));
    let theme = Theme::load_or_default(Some(&theme_path));

    info!("Starting seqline v{}", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Seqline"),
        ..Default::default()
    };

    eframe::run_native(
        "seqline",
        native_options,
        Box::new(move |cc| Ok(Box::new(SeqlineApp::new(cc, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {e}"))
}
