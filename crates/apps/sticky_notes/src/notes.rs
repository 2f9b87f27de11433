//! Sticky note records and the persisted board that owns them.

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde::{Deserialize, Serialize};

/// Preference key holding the JSON array of notes.
pub const STICKY_NOTES_KEY: &str = "stickyNotes";
/// Text given to a freshly added note.
pub const NEW_NOTE_TEXT: &str = "New Note";
/// Offset of a freshly added note inside the board.
pub const NEW_NOTE_POSITION: NotePosition = NotePosition { x: 20.0, y: 20.0 };
/// Background palette for notes.
pub const NOTE_COLORS: [&str; 5] = ["#fffb8f", "#a6f6a8", "#a8d8f8", "#f8c0c0", "#d8b8f8"];

/// Unique note identifier, a unix millisecond timestamp taken when the note was added.
pub type NoteId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Offset of a note's top-left corner inside the board, in CSS pixels.
pub struct NotePosition {
    pub x: f64,
    pub y: f64,
}

impl NotePosition {
    /// Keeps the note inside the board's top-left bounds.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One sticky note.
pub struct StickyNote {
    pub id: NoteId,
    pub text: String,
    pub position: NotePosition,
    pub color: String,
}

/// Picks a palette entry for a note id.
///
/// Ids are millisecond timestamps, so consecutive notes spread across the palette.
pub fn color_for(id: NoteId) -> &'static str {
    NOTE_COLORS[(id % NOTE_COLORS.len() as u64) as usize]
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Ordered collection of notes. Later notes paint on top.
pub struct NoteBoard {
    notes: Vec<StickyNote>,
}

impl NoteBoard {
    pub fn from_notes(notes: Vec<StickyNote>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[StickyNote] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&StickyNote> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a new note with the given id and returns it.
    pub fn add(&mut self, id: NoteId) -> &StickyNote {
        self.notes.push(StickyNote {
            id,
            text: NEW_NOTE_TEXT.to_string(),
            position: NEW_NOTE_POSITION,
            color: color_for(id).to_string(),
        });
        &self.notes[self.notes.len() - 1]
    }

    /// Appends a new note keyed by the next monotonic timestamp.
    pub fn add_now(&mut self) -> NoteId {
        self.add(platform_host::next_monotonic_timestamp_ms()).id
    }

    /// Removes a note. Returns whether anything changed.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.notes.len() != before
    }

    pub fn update_text(&mut self, id: NoteId, text: String) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.text = text;
                true
            }
            None => false,
        }
    }

    /// Records the position a note was dropped at.
    pub fn move_note(&mut self, id: NoteId, position: NotePosition) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.position = position.clamped();
                true
            }
            None => false,
        }
    }

    /// Loads the stored board. Missing or malformed data yields an empty board.
    pub fn load(prefs: &dyn PrefsStore) -> Self {
        match load_pref_with::<_, Vec<StickyNote>>(prefs, STICKY_NOTES_KEY) {
            Ok(Some(notes)) => Self::from_notes(notes),
            Ok(None) => Self::default(),
            Err(err) => {
                logging::warn!("discarding stored sticky notes: {err}");
                Self::default()
            }
        }
    }

    /// Writes the full note list.
    ///
    /// # Errors
    ///
    /// Returns the storage error message when the write fails.
    pub fn save(&self, prefs: &dyn PrefsStore) -> Result<(), String> {
        save_pref_with(prefs, STICKY_NOTES_KEY, &self.notes)
    }
}
