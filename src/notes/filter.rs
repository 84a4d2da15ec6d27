//! Search projection over the note collection

use std::cmp::Reverse;
use std::collections::HashMap;

use super::{Note, NoteId};

/// Ids of notes whose title or content contains `query` (case-insensitive),
/// newest modification first. An empty query keeps every note.
pub fn filter(notes: &HashMap<NoteId, Note>, query: &str) -> Vec<NoteId> {
    let needle = query.to_lowercase();
    let mut hits: Vec<&Note> = notes
        .values()
        .filter(|note| needle.is_empty() || note.matches(&needle))
        .collect();
    hits.sort_by(|a, b| {
        Reverse(a.modified)
            .cmp(&Reverse(b.modified))
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.into_iter().map(|note| note.id.clone()).collect()
}
