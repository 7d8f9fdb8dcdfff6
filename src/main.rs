// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod library;

use app::GameShelfApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "game_shelf=info,game_shelf_core=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load();

    let viewport = egui::ViewportBuilder::default().with_inner_size([
        config.window_width.unwrap_or(1024.0),
        config.window_height.unwrap_or(768.0),
    ]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "My Games",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(GameShelfApp::new(&config)))
        }),
    )
}
