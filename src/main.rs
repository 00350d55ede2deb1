//! Cyberscope - US Cyber Attacks Dashboard
//!
//! Interactive dashboard over the cleaned US subset of the incident table.

use cyberscope::gui::DashboardApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("US Cyber Attacks Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "US Cyber Attacks Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
