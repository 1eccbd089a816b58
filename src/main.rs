//! Health Scatter - interactive scatter chart of per-region health statistics

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use health_scatter::cli::Cli;
use health_scatter::config::AppConfig;
use health_scatter::gui::HealthScatterApp;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .and_then(|c| c.with_overrides(cli.data.clone(), cli.x, cli.y))
        .context("Failed to load configuration")?;
    tracing::info!(
        "Starting with x={} y={} data={:?}",
        config.initial_x,
        config.initial_y,
        config.data_path
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Health Scatter"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Health Scatter",
        options,
        Box::new(move |cc| Ok(Box::new(HealthScatterApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
