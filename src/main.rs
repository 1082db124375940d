//! FinBoard - Sales & Expense Dashboard
//!
//! A Rust application for loading sales and expense CSVs, filtering them,
//! and exploring summary metrics, charts and paginated tables.

mod auth;
mod charts;
mod config;
mod data;
mod export;
mod fmt;
mod gui;
mod stats;

use anyhow::Context;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::AppConfig::load().context("failed to load configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("FinBoard"),
        ..Default::default()
    };

    eframe::run_native(
        "FinBoard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}
