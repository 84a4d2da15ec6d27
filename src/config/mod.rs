//! Configuration management for Sticky Notes
//!
//! This module provides two pieces:
//! - **paths**: where notes, stylesheets and preferences live on disk
//! - **preferences**: the small key-value store persisted between runs (JSON)

pub mod paths;
pub mod preferences;

// Re-export commonly used types
pub use paths::AppPaths;
pub use preferences::Preferences;
