//! Note records and their on-disk store
//!
//! - **store**: `NoteStore`, the in-memory collection kept in sync with `{id}.json` files
//! - **filter**: search projection over the collection, newest first

pub mod filter;
pub mod store;

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::note::UNTITLED;

pub use store::NoteStore;

/// Opaque note identifier, also the filename stem of the note file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A note held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Modification time of the backing file, used for recency ordering
    pub modified: SystemTime,
}

impl Note {
    /// Case-insensitive substring match against title and content
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}

/// On-disk representation: `{"title": ..., "content": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

fn default_title() -> String {
    UNTITLED.to_string()
}

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode note {id}: {source}")]
    Encode {
        id: NoteId,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, NoteError>;
