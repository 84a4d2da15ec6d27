//! On-disk locations
//!
//! Notes and stylesheets live under the platform data dir, preferences under
//! the platform config dir. Both roots can be overridden from the command line.

use std::path::{Path, PathBuf};

use crate::constants::storage::{APP_DIR, NOTES_DIR, PREFERENCES_FILE, THEMES_DIR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
    config_dir: PathBuf,
}

impl AppPaths {
    /// Resolve roots, falling back to `<platform dir>/StickyNotesApp`
    pub fn resolve(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        });
        let config_dir = config_dir.unwrap_or_else(|| {
            let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        });
        Self {
            data_dir,
            config_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join(NOTES_DIR)
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.data_dir.join(THEMES_DIR)
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }
}
