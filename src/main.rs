#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod settings;
mod ui;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "timesheet=info,rust_timesheet=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 800.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Rust Timesheet"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Timesheet",
        options,
        Box::new(|cc| Ok(Box::new(app::TimesheetApp::new(cc)))),
    )
}
