//! Application-wide constants
//!
//! This module contains the string literals and fixed values used throughout
//! the application, providing a single source of truth for constant values.

/// Storage layout and preference locations
pub mod storage {
    /// Directory name used under the platform data/config dirs
    pub const APP_DIR: &str = "StickyNotesApp";

    /// Subdirectory holding one file per note
    pub const NOTES_DIR: &str = "notes";

    /// Subdirectory holding the stylesheet files
    pub const THEMES_DIR: &str = "themes";

    /// Extension of note files (`{id}.json`)
    pub const NOTE_EXTENSION: &str = "json";

    /// Key-value preferences file name
    pub const PREFERENCES_FILE: &str = "preferences.json";

    /// Environment variable overriding the base data directory
    pub const DATA_DIR_ENV: &str = "STICKY_NOTES_DIR";
}

/// Note defaults
pub mod note {
    /// Title given to freshly created notes
    pub const NEW_NOTE_TITLE: &str = "New Note";

    /// Title shown for records stored without one
    pub const UNTITLED: &str = "Untitled Note";
}

/// Auto-save timing
pub mod autosave {
    /// Quiet period after the last edit before the current note is written
    pub const DELAY_MS: u64 = 1000;
}

/// Preference keys
pub mod preferences {
    /// Key holding the selected theme name
    pub const THEME_KEY: &str = "theme";
}
