use crate::model::{Note, NoteId};
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use tracing::debug;

/// Ordered, id-keyed collection of notes.
///
/// Every mutating operation leaves `self` untouched and hands back a new
/// snapshot, or `None` when the operation does not apply (unknown id, blank
/// content). Callers swap the snapshot in whole, so a renderer never sees a
/// half-applied change.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    index: HashMap<NoteId, usize>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NoteStoreError {
    #[error("note id already in use: {0}")]
    DuplicateId(NoteId),
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.index.get(id).map(|&idx| &self.notes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Notes of one section, most votes first. Equal vote counts keep
    /// insertion order.
    pub fn in_section(&self, section_id: &str) -> Vec<&Note> {
        let mut notes = self
            .notes
            .iter()
            .filter(|n| n.section_id == section_id)
            .collect::<Vec<_>>();
        notes.sort_by(|a, b| b.votes.cmp(&a.votes));
        notes
    }

    pub fn count_in_section(&self, section_id: &str) -> usize {
        self.notes
            .iter()
            .filter(|n| n.section_id == section_id)
            .count()
    }

    /// Appends `note` as given. Fails if its id is already present.
    pub fn insert(&self, note: Note) -> Result<Self, NoteStoreError> {
        if self.index.contains_key(&note.id) {
            return Err(NoteStoreError::DuplicateId(note.id));
        }
        let mut next = self.clone();
        next.index.insert(note.id.clone(), next.notes.len());
        next.notes.push(note);
        Ok(next)
    }

    /// Creates a note with a fresh id and no votes. Blank content is ignored.
    pub fn add(&self, section_id: &str, content: &str, color: &str) -> Option<(Self, NoteId)> {
        if content.trim().is_empty() {
            debug!(section_id, "ignoring note with blank content");
            return None;
        }
        let id = self.generate_id();
        let note = Note::new(
            id.clone(),
            content.to_string(),
            section_id.to_string(),
            color.to_string(),
        );
        // generate_id only hands out free ids
        let next = self.insert(note).ok()?;
        Some((next, id))
    }

    pub fn move_note(&self, note_id: &str, dest_section_id: &str) -> Option<Self> {
        self.update(note_id, |note| note.section_id = dest_section_id.to_string())
    }

    pub fn vote(&self, note_id: &str) -> Option<Self> {
        self.update(note_id, |note| note.votes = note.votes.saturating_add(1))
    }

    pub fn edit(&self, note_id: &str, content: &str) -> Option<Self> {
        self.update(note_id, |note| note.content = content.to_string())
    }

    pub fn delete(&self, note_id: &str) -> Option<Self> {
        if !self.contains(note_id) {
            return None;
        }
        let notes = self
            .notes
            .iter()
            .filter(|n| n.id != note_id)
            .cloned()
            .collect::<Vec<_>>();
        let index = notes
            .iter()
            .enumerate()
            .map(|(idx, n)| (n.id.clone(), idx))
            .collect();
        Some(NoteStore { notes, index })
    }

    fn update<F>(&self, note_id: &str, f: F) -> Option<Self>
    where
        F: FnOnce(&mut Note),
    {
        let idx = *self.index.get(note_id)?;
        let mut next = self.clone();
        f(&mut next.notes[idx]);
        Some(next)
    }

    /// `note-<unix millis>`, with a random suffix when that id is taken.
    fn generate_id(&self) -> NoteId {
        let base = format!("note-{}", Utc::now().timestamp_millis());
        if !self.contains(&base) {
            return base;
        }
        loop {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(6)
                .map(char::from)
                .collect();
            let candidate = format!("{}-{}", base, suffix);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
