//! Note models for the per-interval notepad and the grouped notes view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bucket name for notes whose interval carries no hashtag.
pub const UNTAGGED: &str = "#untagged";

/// Text saved from the notepad of one history row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteData {
    pub main_ideas: String,
    pub detailed_notes: String,
}

impl NoteData {
    /// First line of the main ideas, used as the activity title.
    pub fn headline(&self) -> Option<&str> {
        if self.main_ideas.trim().is_empty() {
            return None;
        }
        self.main_ideas.split('\n').next()
    }
}

/// A note placed in one tag bucket of the notes view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub index: usize,
    pub committed_at: DateTime<Utc>,
    pub elapsed_secs: u64,
    /// `45s` / `2m 5s`.
    pub elapsed_label: String,
    pub clock: String,
    pub title: String,
    pub note: NoteData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagNoteGroup {
    pub tag: String,
    pub notes: Vec<NoteEntry>,
}

impl TagNoteGroup {
    pub fn is_untagged(&self) -> bool {
        self.tag == UNTAGGED
    }
}
