//! DataScope - DNA Nucleotide Counter & NFL Rushing Stats Explorer

use anyhow::Context;
use datascope::config::StatsSourceConfig;
use datascope::data::HttpFetcher;
use datascope::gui::DataScopeApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fetcher = HttpFetcher::new(StatsSourceConfig::default())
        .context("Failed to build HTTP client")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("DataScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "DataScope",
        options,
        Box::new(move |cc| Ok(Box::new(DataScopeApp::new(cc, fetcher)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
