//! Light/dark theme handling
//!
//! Each theme is a small JSON stylesheet in the `themes/` directory, written
//! with built-in colors on first run and left alone afterwards so it can be
//! edited by hand. The active theme name is kept in the preferences store.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Preferences;
use crate::constants::preferences::THEME_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("Unknown theme '{other}'")),
        }
    }
}

/// Colors accept `#RRGGBB` or `#AARRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub dark_mode: bool,
    pub window_fill: String,
    pub panel_fill: String,
    pub text_color: String,
    pub faint_bg: String,
    pub extreme_bg: String,
    pub selection: String,
    pub hyperlink: String,
}

impl Stylesheet {
    pub fn builtin(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                dark_mode: false,
                window_fill: "#F8F8F8".to_string(),
                panel_fill: "#F0F0F0".to_string(),
                text_color: "#333333".to_string(),
                faint_bg: "#E8E8E8".to_string(),
                extreme_bg: "#FFFFFF".to_string(),
                selection: "#ADD8E6".to_string(),
                hyperlink: "#007BFF".to_string(),
            },
            Theme::Dark => Self {
                dark_mode: true,
                window_fill: "#2B2B2B".to_string(),
                panel_fill: "#1E1E1E".to_string(),
                text_color: "#F0F0F0".to_string(),
                faint_bg: "#333333".to_string(),
                extreme_bg: "#3C3C3C".to_string(),
                selection: "#555555".to_string(),
                hyperlink: "#6CB4FF".to_string(),
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse stylesheet {:?}", path))
    }

    pub fn to_visuals(&self) -> Result<egui::Visuals> {
        let mut visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_fill = parse_hex_color(&self.window_fill)?;
        visuals.panel_fill = parse_hex_color(&self.panel_fill)?;
        visuals.override_text_color = Some(parse_hex_color(&self.text_color)?);
        visuals.faint_bg_color = parse_hex_color(&self.faint_bg)?;
        visuals.extreme_bg_color = parse_hex_color(&self.extreme_bg)?;
        visuals.selection.bg_fill = parse_hex_color(&self.selection)?;
        visuals.hyperlink_color = parse_hex_color(&self.hyperlink)?;
        Ok(visuals)
    }
}

fn parse_hex_color(hex: &str) -> Result<egui::Color32> {
    let digits = hex.trim().trim_start_matches('#');
    let byte = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| anyhow!("Invalid color '{hex}'"))
    };

    match digits.len() {
        6 => Ok(egui::Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(egui::Color32::from_rgba_unmultiplied(
            byte(2)?,
            byte(4)?,
            byte(6)?,
            byte(0)?,
        )),
        _ => Err(anyhow!("Invalid color '{hex}' (expected #RRGGBB or #AARRGGBB)")),
    }
}

/// Write the built-in stylesheets that are missing from `dir`
pub fn ensure_stylesheets(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create themes directory {:?}", dir))?;
    for theme in Theme::ALL {
        let path = dir.join(theme.file_name());
        if path.exists() {
            continue;
        }
        let json = serde_json::to_string_pretty(&Stylesheet::builtin(theme))
            .context("Failed to serialize stylesheet")?;
        fs::write(&path, json).with_context(|| format!("Failed to write stylesheet {:?}", path))?;
        info!(path = %path.display(), "Created stylesheet");
    }
    Ok(())
}

pub struct ThemeManager {
    themes_dir: PathBuf,
    preferences: Preferences,
    current: Theme,
}

impl ThemeManager {
    /// Read the preferred theme, defaulting to light
    pub fn new(themes_dir: impl Into<PathBuf>, preferences: Preferences) -> Self {
        let current = match preferences.get(THEME_KEY) {
            Some(name) => name.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring theme preference");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Self {
            themes_dir: themes_dir.into(),
            preferences,
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn stylesheet_path(&self, theme: Theme) -> PathBuf {
        self.themes_dir.join(theme.file_name())
    }

    /// Visuals for the current theme, or egui's defaults if the stylesheet is unusable
    pub fn visuals(&self) -> egui::Visuals {
        let path = self.stylesheet_path(self.current);
        match Stylesheet::load(&path).and_then(|sheet| sheet.to_visuals()) {
            Ok(visuals) => visuals,
            Err(err) => {
                warn!(theme = %self.current, error = ?err, "Stylesheet unavailable, using default style");
                egui::Visuals::default()
            }
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
        info!(theme = %self.current, "Applied theme");
    }

    /// Flip light/dark and persist the choice
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        if let Err(err) = self.preferences.set(THEME_KEY, self.current.as_str()) {
            error!(error = ?err, "Failed to persist theme preference");
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> ThemeManager {
        let themes = dir.path().join("themes");
        ensure_stylesheets(&themes).unwrap();
        let prefs = Preferences::load(dir.path().join("preferences.json"));
        ThemeManager::new(themes, prefs)
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_defaults_to_light_without_preference() {
        let dir = TempDir::new().unwrap();
        assert_eq!(manager(&dir).current(), Theme::Light);
    }

    #[test]
    fn test_toggle_twice_restores_preference() {
        let dir = TempDir::new().unwrap();
        let mut themes = manager(&dir);

        assert_eq!(themes.toggle(), Theme::Dark);
        let persisted = Preferences::load(dir.path().join("preferences.json"));
        assert_eq!(persisted.get(THEME_KEY), Some("dark"));

        assert_eq!(themes.toggle(), Theme::Light);
        let persisted = Preferences::load(dir.path().join("preferences.json"));
        assert_eq!(persisted.get(THEME_KEY), Some("light"));
    }

    #[test]
    fn test_saved_preference_is_reapplied() {
        let dir = TempDir::new().unwrap();
        manager(&dir).toggle();
        let themes = manager(&dir);
        assert_eq!(themes.current(), Theme::Dark);
        assert!(themes.visuals().dark_mode);
    }

    #[test]
    fn test_existing_stylesheets_are_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let themes = dir.path().join("themes");
        fs::create_dir_all(&themes).unwrap();
        fs::write(themes.join("light.json"), "custom").unwrap();

        ensure_stylesheets(&themes).unwrap();
        assert_eq!(fs::read_to_string(themes.join("light.json")).unwrap(), "custom");
        assert!(themes.join("dark.json").exists());
    }

    #[test]
    fn test_missing_stylesheet_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let themes = manager(&dir);
        fs::remove_file(themes.stylesheet_path(Theme::Light)).unwrap();
        let visuals = themes.visuals();
        assert_eq!(visuals.override_text_color, None);
        assert_eq!(visuals.panel_fill, egui::Visuals::default().panel_fill);
    }

    #[test]
    fn test_builtin_light_stylesheet_colors() {
        let visuals = Stylesheet::builtin(Theme::Light).to_visuals().unwrap();
        assert!(!visuals.dark_mode);
        assert_eq!(visuals.panel_fill, egui::Color32::from_rgb(0xF0, 0xF0, 0xF0));
        assert_eq!(
            visuals.override_text_color,
            Some(egui::Color32::from_rgb(0x33, 0x33, 0x33))
        );
    }

    #[test]
    fn test_parse_hex_color_formats() {
        assert_eq!(
            parse_hex_color("#FF0000").unwrap(),
            egui::Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            parse_hex_color("FF00FF00").unwrap(),
            egui::Color32::from_rgba_unmultiplied(0, 255, 0, 255)
        );
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
    }
}
