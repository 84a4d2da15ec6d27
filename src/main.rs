#![forbid(unsafe_code)]

mod autosave;
mod config;
mod constants;
mod gui;
mod notes;
mod session;
mod theme;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::{AppPaths, Preferences};
use notes::NoteStore;
use session::Session;
use theme::ThemeManager;

/// Desktop sticky notes, one JSON file per note
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Base directory holding `notes/` and `themes/`
    #[arg(long, env = constants::storage::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Directory holding the preferences file
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn parse_log_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(&args.log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let paths = AppPaths::resolve(args.data_dir, args.config_dir);
    info!(data = %paths.data_dir().display(), prefs = %paths.preferences_file().display(), "Resolved storage paths");

    let store = NoteStore::open(paths.notes_dir())
        .with_context(|| format!("Failed to open notes directory {:?}", paths.notes_dir()))?;

    // Missing stylesheets only cost us the styling, not the app
    if let Err(err) = theme::ensure_stylesheets(&paths.themes_dir()) {
        warn!(error = ?err, "Could not create theme stylesheets");
    }
    let themes = ThemeManager::new(
        paths.themes_dir(),
        Preferences::load(paths.preferences_file()),
    );

    if store.is_empty() {
        info!(path = %store.dir().display(), "No notes yet");
    }

    let session = Session::new(store);
    gui::run_gui(session, themes)
}
