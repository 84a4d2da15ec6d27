//! GUI-specific constants for layout and dialog colors

use egui;

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 1000.0;
pub const WINDOW_HEIGHT: f32 = 700.0;
pub const WINDOW_MIN_WIDTH: f32 = 640.0;
pub const WINDOW_MIN_HEIGHT: f32 = 400.0;

pub const WINDOW_TITLE: &str = "Sticky Notes App";

/// Note list panel
pub const LIST_MIN_WIDTH: f32 = 250.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Dialog colors
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
