//! Application state for the notes window
//!
//! `Session` owns the note store together with the "current note" pointer,
//! the editable title/content buffers, the visible (filtered) list and the
//! auto-save debouncer. The GUI only reads from it and forwards user actions.
//!
//! Two write paths exist for the editor buffers:
//! - `load_fields` is programmatic (selection changes) and never arms auto-save
//! - `edit_title` / `edit_content` are user edits and restart the debouncer

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::autosave::Debouncer;
use crate::constants::note::{NEW_NOTE_TITLE, UNTITLED};
use crate::notes::{filter, NoteId, NoteStore};

/// Editor field the GUI should move keyboard focus to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// Message shown to the user in a blocking dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn error(title: &str, message: String) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message,
        }
    }

    fn info(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

pub struct Session {
    store: NoteStore,
    current: Option<NoteId>,
    visible: Vec<NoteId>,
    query: String,
    title: String,
    content: String,
    autosave: Debouncer,
    notice: Option<Notice>,
    focus: Option<Focus>,
}

impl Session {
    pub fn new(store: NoteStore) -> Self {
        Self::with_debouncer(store, Debouncer::default())
    }

    /// Build the session and select the most recently modified note
    pub fn with_debouncer(store: NoteStore, autosave: Debouncer) -> Self {
        let visible = store.recent_first();
        let mut session = Self {
            store,
            current: None,
            visible,
            query: String::new(),
            title: String::new(),
            content: String::new(),
            autosave,
            notice: None,
            focus: None,
        };
        let first = session.visible.first().cloned();
        session.select(first);
        session
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn current(&self) -> Option<&NoteId> {
        self.current.as_ref()
    }

    pub fn visible(&self) -> &[NoteId] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// List label for a note
    pub fn label_for(&self, id: &NoteId) -> &str {
        match self.store.get(id) {
            Some(note) if !note.title.trim().is_empty() => &note.title,
            _ => UNTITLED,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn take_focus_request(&mut self) -> Option<Focus> {
        self.focus.take()
    }

    /// Time until the pending auto-save fires
    pub fn next_autosave_in(&self, now: Instant) -> Option<Duration> {
        self.autosave.remaining(now)
    }

    /// Make `id` the current note, flushing the previous one first
    pub fn select(&mut self, id: Option<NoteId>) {
        if id.is_some() && id == self.current {
            return;
        }
        self.flush();

        match id {
            Some(id) if self.store.contains(&id) => {
                debug!(note = %id, "Selected note");
                self.current = Some(id);
                self.load_fields();
            }
            Some(id) => {
                warn!(note = %id, "Selected note not found in collection");
                self.current = None;
                self.load_fields();
            }
            None => {
                self.current = None;
                self.load_fields();
            }
        }
    }

    /// Copy the current note into the editor buffers without arming auto-save
    fn load_fields(&mut self) {
        match self.current.as_ref().and_then(|id| self.store.get(id)) {
            Some(note) => {
                self.title = note.title.clone();
                self.content = note.content.clone();
            }
            None => {
                self.title.clear();
                self.content.clear();
            }
        }
    }

    /// Synchronously persist the editor buffers into the current note
    pub fn flush(&mut self) {
        self.autosave.cancel();
        let Some(id) = self.current.clone() else {
            return;
        };
        if !self.store.contains(&id) {
            return;
        }
        if let Err(err) = self.store.save(&id, &self.title, &self.content) {
            error!(note = %id, error = %err, "Failed to save note");
            self.notice = Some(Notice::error(
                "Save Error",
                format!("Could not save note: {err}"),
            ));
        }
    }

    /// User edit of the title field; the list label follows immediately
    pub fn edit_title(&mut self, title: String, now: Instant) {
        self.title = title;
        if let Some(id) = &self.current {
            self.store.set_title(id, &self.title);
            self.autosave.restart(now);
        }
    }

    /// User edit of the content field
    pub fn edit_content(&mut self, content: String, now: Instant) {
        self.content = content;
        if self.current.is_some() {
            self.autosave.restart(now);
        }
    }

    /// Run the auto-save if its quiet period has elapsed
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.autosave.poll(now) {
            debug!("Auto-save deadline reached");
            self.flush();
            true
        } else {
            false
        }
    }

    /// Create an empty note at the top of the list and select it
    pub fn create_note(&mut self) -> NoteId {
        self.flush();

        let id = self.store.insert_new();
        self.visible.insert(0, id.clone());
        self.current = Some(id.clone());
        self.title = NEW_NOTE_TITLE.to_string();
        self.content.clear();
        self.focus = Some(Focus::Content);

        if let Err(err) = self.store.save(&id, &self.title, &self.content) {
            error!(note = %id, error = %err, "Failed to save new note");
            self.notice = Some(Notice::error(
                "Save Error",
                format!("Could not save note: {err}"),
            ));
        }
        info!(note = %id, "Created note");
        id
    }

    /// Delete the current note and select the first remaining visible one
    pub fn delete_current(&mut self) -> bool {
        let Some(id) = self.current.clone() else {
            self.notice = Some(Notice::info(
                "No Note Selected",
                "Please select a note to delete.",
            ));
            return false;
        };

        self.autosave.cancel();
        if let Err(err) = self.store.delete(&id) {
            error!(note = %id, error = %err, "Failed to delete note");
            self.notice = Some(Notice::error(
                "Delete Error",
                format!("Could not delete note: {err}"),
            ));
            return false;
        }

        self.visible.retain(|visible| visible != &id);
        self.current = None;
        self.load_fields();
        info!(note = %id, "Deleted note");

        let next = self.visible.first().cloned();
        self.select(next);
        true
    }

    /// Renaming is done in place: focus the title field of the current note
    pub fn rename_current(&mut self) {
        if self.current.is_some() {
            self.focus = Some(Focus::Title);
        } else {
            self.notice = Some(Notice::info(
                "No Note Selected",
                "Please select a note to rename.",
            ));
        }
    }

    /// Recompute the visible list for `query` and select its first entry
    pub fn set_query(&mut self, query: String) {
        if self.autosave.is_pending() {
            self.flush();
        }
        self.query = query;
        self.visible = filter::filter(self.store.notes(), &self.query);
        debug!(query = %self.query, hits = self.visible.len(), "Filtered notes");

        let first = self.visible.first().cloned();
        self.select(first);
    }

    /// Persist outstanding edits before the window closes
    pub fn shutdown(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::store::load_all;
    use std::fs::{self, File};
    use std::path::Path;
    use std::time::SystemTime;
    use tempfile::TempDir;

    const DELAY: Duration = Duration::from_millis(1000);

    fn write_note(dir: &Path, id: &str, title: &str, content: &str, secs: u64) {
        let path = dir.join(format!("{id}.json"));
        let body = serde_json::json!({ "title": title, "content": content });
        fs::write(&path, body.to_string()).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn session_with(notes: &[(&str, &str, &str, u64)]) -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let notes_dir = dir.path().join("notes");
        fs::create_dir_all(&notes_dir).unwrap();
        for (id, title, content, secs) in notes {
            write_note(&notes_dir, id, title, content, *secs);
        }
        let store = NoteStore::open(notes_dir).unwrap();
        (dir, Session::with_debouncer(store, Debouncer::new(DELAY)))
    }

    fn on_disk(session: &Session, id: &str) -> (String, String) {
        let notes = load_all(session.store().dir()).unwrap();
        let note = &notes[&NoteId::from(id)];
        (note.title.clone(), note.content.clone())
    }

    #[test]
    fn test_startup_selects_most_recent_note() {
        let (_dir, session) = session_with(&[("a", "Old", "x", 10), ("b", "New", "y", 20)]);
        assert_eq!(session.current(), Some(&NoteId::from("b")));
        assert_eq!(session.title(), "New");
        assert_eq!(session.content(), "y");
    }

    #[test]
    fn test_empty_store_has_no_selection() {
        let (_dir, session) = session_with(&[]);
        assert_eq!(session.current(), None);
        assert_eq!(session.title(), "");
        assert!(session.visible().is_empty());
    }

    #[test]
    fn test_selection_load_does_not_arm_autosave() {
        let (_dir, mut session) = session_with(&[("a", "A", "", 10), ("b", "B", "", 20)]);
        session.select(Some(NoteId::from("a")));
        assert_eq!(session.next_autosave_in(Instant::now()), None);
    }

    #[test]
    fn test_rapid_edits_save_once_with_final_values() {
        let (_dir, mut session) = session_with(&[("a", "Draft", "", 10)]);
        let start = Instant::now();

        session.edit_content("h".to_string(), start);
        session.edit_content("he".to_string(), start + Duration::from_millis(300));
        session.edit_title("Final".to_string(), start + Duration::from_millis(600));
        session.edit_content("hello".to_string(), start + Duration::from_millis(900));

        // Still inside the quiet period of the last edit
        assert!(!session.tick(start + Duration::from_millis(1500)));
        assert_eq!(on_disk(&session, "a"), ("Draft".to_string(), String::new()));

        assert!(session.tick(start + Duration::from_millis(1900)));
        assert_eq!(on_disk(&session, "a"), ("Final".to_string(), "hello".to_string()));
        assert!(!session.tick(start + Duration::from_millis(5000)));
    }

    #[test]
    fn test_title_edit_updates_list_label_before_save() {
        let (_dir, mut session) = session_with(&[("a", "Before", "", 10)]);
        session.edit_title("After".to_string(), Instant::now());

        assert_eq!(session.label_for(&NoteId::from("a")), "After");
        assert_eq!(on_disk(&session, "a").0, "Before");
    }

    #[test]
    fn test_switching_selection_flushes_previous_note() {
        let (_dir, mut session) = session_with(&[("a", "A", "old", 20), ("b", "B", "bee", 10)]);
        assert_eq!(session.current(), Some(&NoteId::from("a")));

        session.edit_content("unsaved edit".to_string(), Instant::now());
        session.select(Some(NoteId::from("b")));

        assert_eq!(on_disk(&session, "a").1, "unsaved edit");
        assert_eq!(session.title(), "B");
        assert_eq!(session.content(), "bee");
        assert_eq!(session.next_autosave_in(Instant::now()), None);
    }

    #[test]
    fn test_create_then_delete_leaves_nothing() {
        let (_dir, mut session) = session_with(&[]);
        let id = session.create_note();
        assert!(session.store().path_for(&id).exists());
        assert_eq!(session.visible(), &[id.clone()]);
        assert_eq!(session.title(), NEW_NOTE_TITLE);
        assert_eq!(session.take_focus_request(), Some(Focus::Content));

        assert!(session.delete_current());
        assert!(!session.store().contains(&id));
        assert_eq!(fs::read_dir(session.store().dir()).unwrap().count(), 0);
        assert_eq!(session.current(), None);
        assert!(session.visible().is_empty());
    }

    #[test]
    fn test_create_flushes_current_and_goes_to_top() {
        let (_dir, mut session) = session_with(&[("a", "A", "", 10)]);
        session.edit_content("kept".to_string(), Instant::now());

        let id = session.create_note();
        assert_eq!(on_disk(&session, "a").1, "kept");
        assert_eq!(session.visible().first(), Some(&id));
        assert_eq!(session.current(), Some(&id));
        assert_eq!(session.content(), "");
    }

    #[test]
    fn test_delete_selects_next_visible_note() {
        let (_dir, mut session) = session_with(&[("a", "A", "", 30), ("b", "B", "", 20)]);
        assert!(session.delete_current());
        assert_eq!(session.current(), Some(&NoteId::from("b")));
        assert_eq!(session.title(), "B");
    }

    #[test]
    fn test_delete_without_selection_reports_notice() {
        let (_dir, mut session) = session_with(&[]);
        assert!(!session.delete_current());
        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.title, "No Note Selected");

        session.dismiss_notice();
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_rename_focuses_title_field() {
        let (_dir, mut session) = session_with(&[("a", "A", "", 10)]);
        session.rename_current();
        assert_eq!(session.take_focus_request(), Some(Focus::Title));
        assert_eq!(session.take_focus_request(), None);

        session.select(None);
        session.rename_current();
        assert_eq!(session.notice().map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_query_filters_and_selects_first_hit() {
        let (_dir, mut session) = session_with(&[
            ("a", "Alpha", "", 10),
            ("b", "Beta", "", 20),
            ("g", "Gamma", "", 30),
        ]);
        session.set_query("eta".to_string());
        assert_eq!(session.visible(), &[NoteId::from("b")]);
        assert_eq!(session.current(), Some(&NoteId::from("b")));
        assert_eq!(session.title(), "Beta");

        session.set_query(String::new());
        let labels: Vec<&str> = session.visible().iter().map(|id| session.label_for(id)).collect();
        assert_eq!(labels, vec!["Gamma", "Beta", "Alpha"]);
    }

    #[test]
    fn test_query_without_hits_clears_selection() {
        let (_dir, mut session) = session_with(&[("a", "Alpha", "text", 10)]);
        session.set_query("nothing".to_string());
        assert!(session.visible().is_empty());
        assert_eq!(session.current(), None);
        assert_eq!(session.title(), "");
        assert_eq!(session.content(), "");
    }

    #[test]
    fn test_query_sees_pending_content_edits() {
        let (_dir, mut session) = session_with(&[("a", "Alpha", "", 10), ("b", "Beta", "", 5)]);
        session.edit_content("needle".to_string(), Instant::now());
        session.set_query("needle".to_string());
        assert_eq!(session.visible(), &[NoteId::from("a")]);
    }

    #[test]
    fn test_save_failure_raises_error_notice() {
        let (dir, mut session) = session_with(&[("a", "A", "", 10)]);
        fs::remove_dir_all(session.store().dir()).unwrap();
        fs::write(dir.path().join("notes"), "blocker").unwrap();

        session.edit_content("lost".to_string(), Instant::now());
        session.flush();

        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Could not save note"));
        assert_eq!(session.store().get(&NoteId::from("a")).unwrap().content, "lost");
    }

    #[test]
    fn test_shutdown_flushes_pending_edit() {
        let (_dir, mut session) = session_with(&[("a", "A", "", 10)]);
        session.edit_content("last words".to_string(), Instant::now());
        session.shutdown();
        assert_eq!(on_disk(&session, "a").1, "last words");
    }
}
