use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;

use relations_graph::app::{RelationsApp, ViewerOptions};
use relations_graph::config::Settings;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Network JSON file; a built-in sample is shown when omitted.
    #[arg(long)]
    network: Option<PathBuf>,

    /// Settings JSON file with layout tunables and opinion thresholds.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Start with the actors locked on a circle.
    #[arg(long)]
    circle: bool,

    /// Seed for the initial scatter, for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    info!(
        "starting viewer (network: {}, circle: {}, seed: {:?})",
        args.network
            .as_deref()
            .map_or_else(|| "sample".to_owned(), |path| path.display().to_string()),
        args.circle,
        args.seed
    );

    let viewer = ViewerOptions {
        network: args.network,
        settings,
        circle: args.circle,
        seed: args.seed,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "relations-graph",
        options,
        Box::new(move |cc| Ok(Box::new(RelationsApp::new(cc, viewer)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
