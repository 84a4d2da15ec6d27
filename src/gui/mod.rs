//! Notes window (egui/eframe)

mod app;
mod components;
mod constants;

pub use app::run_gui;
