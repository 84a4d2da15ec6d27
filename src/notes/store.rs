//! Note Store: one `{id}.json` file per note, mirrored by an in-memory map

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{filter, Note, NoteError, NoteId, NoteRecord, Result};
use crate::constants::note::NEW_NOTE_TITLE;
use crate::constants::storage::NOTE_EXTENSION;

/// In-memory note collection backed by one `{id}.json` file per note
///
/// The map is the single source of truth for display. Disk is only read in
/// [`NoteStore::open`]; every later change goes memory first, then file.
#[derive(Debug)]
pub struct NoteStore {
    dir: PathBuf,
    notes: HashMap<NoteId, Note>,
}

impl NoteStore {
    /// Open the notes directory, creating it if needed, and load every note in it
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let notes = load_all(&dir)?;
        info!(path = %dir.display(), count = notes.len(), "Loaded notes");
        Ok(Self { dir, notes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &NoteId) -> PathBuf {
        note_path(&self.dir, id)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    pub fn notes(&self) -> &HashMap<NoteId, Note> {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All ids, most recently modified first
    pub fn recent_first(&self) -> Vec<NoteId> {
        filter::filter(&self.notes, "")
    }

    /// Update the in-memory title only; the file follows on the next save
    pub fn set_title(&mut self, id: &NoteId, title: &str) -> bool {
        match self.notes.get_mut(id) {
            Some(note) => {
                note.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Insert a fresh "New Note" record in memory and return its id
    ///
    /// Nothing is written here; callers follow up with [`NoteStore::save`].
    pub fn insert_new(&mut self) -> NoteId {
        let id = NoteId::generate();
        self.notes.insert(
            id.clone(),
            Note {
                id: id.clone(),
                title: NEW_NOTE_TITLE.to_string(),
                content: String::new(),
                modified: SystemTime::now(),
            },
        );
        debug!(note = %id, "Created note in memory");
        id
    }

    /// Write the full record for `id`, overwriting any existing file
    ///
    /// The in-memory record is updated before writing and is not rolled back
    /// when the write fails.
    pub fn save(&mut self, id: &NoteId, title: &str, content: &str) -> Result<()> {
        let path = self.path_for(id);
        let note = self.notes.entry(id.clone()).or_insert_with(|| Note {
            id: id.clone(),
            title: String::new(),
            content: String::new(),
            modified: SystemTime::now(),
        });
        note.title = title.to_string();
        note.content = content.to_string();
        note.modified = SystemTime::now();

        let record = NoteRecord {
            title: title.to_string(),
            content: content.to_string(),
        };
        write_record(&path, id, &record)?;

        if let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) {
            note.modified = modified;
        }
        debug!(note = %id, "Note saved");
        Ok(())
    }

    /// Remove the note's file and its in-memory entry
    ///
    /// A file that is already gone counts as removed.
    pub fn delete(&mut self, id: &NoteId) -> Result<()> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "Note file deleted"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Note file already absent");
            }
            Err(source) => return Err(NoteError::Io { path, source }),
        }
        self.notes.remove(id);
        Ok(())
    }
}

fn note_path(dir: &Path, id: &NoteId) -> PathBuf {
    dir.join(format!("{}.{}", id, NOTE_EXTENSION))
}

/// Load every `*.json` note in `dir`
///
/// Files that cannot be read or parsed are logged and skipped.
pub fn load_all(dir: &Path) -> Result<HashMap<NoteId, Note>> {
    fs::create_dir_all(dir).map_err(|source| NoteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let entries = fs::read_dir(dir).map_err(|source| NoteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut notes = HashMap::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "Failed to read directory entry");
                continue;
            }
        };
        if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping note file with non UTF-8 name");
            continue;
        };
        let id = NoteId::from(stem);

        match read_note(&path, id.clone()) {
            Ok(note) => {
                notes.insert(id, note);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable note"),
        }
    }
    Ok(notes)
}

fn read_note(path: &Path, id: NoteId) -> anyhow::Result<Note> {
    let contents = fs::read_to_string(path)?;
    let record: NoteRecord = serde_json::from_str(&contents)?;
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    Ok(Note {
        id,
        title: record.title,
        content: record.content,
        modified,
    })
}

/// Pretty-print with 4-space indent into a temp file, then rename over `path`
fn write_record(path: &Path, id: &NoteId, record: &NoteRecord) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut serializer)
        .map_err(|source| NoteError::Encode {
            id: id.clone(),
            source,
        })?;

    let tmp = path.with_extension(format!("{}.tmp", NOTE_EXTENSION));
    let result = fs::write(&tmp, &buf)
        .map_err(|source| NoteError::Io {
            path: tmp.clone(),
            source,
        })
        .and_then(|()| {
            fs::rename(&tmp, path).map_err(|source| NoteError::Io {
                path: path.to_path_buf(),
                source,
            })
        });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
