//! Persisted notes list.
//!
//! The whole sequence lives as one JSON array under a single fixed key.
//! Every mutation re-loads the persisted data first, so the store is the
//! source of truth and the in-memory tree is always rebuilt from it.

use tracing::warn;

use crate::storage::KeyValueStore;

pub const NOTES_STORAGE_KEY: &str = "animation-notes.json";

pub struct NotesStore {
    store: Box<dyn KeyValueStore>,
}

impl NotesStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        NotesStore { store }
    }

    /// Absent or unreadable data is an empty list, never an error.
    pub fn load(&self) -> Vec<String> {
        let Some(raw) = self.store.get(NOTES_STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(error = %err, "stored notes are unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Appends the text verbatim and returns the new sequence. Blank or
    /// whitespace-only text leaves the store untouched.
    pub fn add(&mut self, text: &str) -> Vec<String> {
        let mut notes = self.load();
        if text.trim().is_empty() {
            return notes;
        }
        notes.push(text.to_string());
        self.persist(&notes);
        notes
    }

    /// Removes the note at `index`. Out-of-range indexes are warned no-ops.
    pub fn remove_at(&mut self, index: usize) -> Vec<String> {
        let mut notes = self.load();
        if index >= notes.len() {
            warn!(index, count = notes.len(), "note delete out of range");
            return notes;
        }
        notes.remove(index);
        self.persist(&notes);
        notes
    }

    fn persist(&mut self, notes: &[String]) {
        match serde_json::to_string(notes) {
            Ok(raw) => {
                if let Err(err) = self.store.set(NOTES_STORAGE_KEY, &raw) {
                    warn!(error = %err, "failed to persist notes");
                }
            }
            Err(err) => warn!(error = %err, "failed to encode notes"),
        }
    }
}
