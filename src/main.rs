//! State Scatter - Interactive demographic scatterplot
//!
//! Plots per-state indicators against each other with switchable axes.

use eframe::egui;
use state_scatter::config::ChartConfig;
use state_scatter::gui::ScatterApp;
use tracing::error;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ChartConfig::load_or_default().unwrap_or_else(|e| {
        error!(error = %format!("{:#}", e), "invalid chart config, using defaults");
        ChartConfig::default()
    });

    // Chart canvas plus the control panel
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.svg_width as f32 + 340.0,
                config.svg_height as f32 + 40.0,
            ])
            .with_title("State Scatter"),
        ..Default::default()
    };

    eframe::run_native(
        "State Scatter",
        options,
        Box::new(move |cc| Ok(Box::new(ScatterApp::new(cc, config)))),
    )
}
