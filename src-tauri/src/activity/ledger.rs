//! Per-interval annotations written by the UI after a record exists:
//! activity titles, tag strings and notepad contents.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{
    models::{IntervalRecord, NoteData},
    tags::TagAnnotations,
    timer::History,
    utils::{format_clock, format_duration},
};

/// One row of the history table as the UI renders it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub index: usize,
    pub record: IntervalRecord,
    /// Local wall-clock time of the commit, `hh:mm AM`.
    pub clock: String,
    pub elapsed_display: String,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub has_note: bool,
    /// Saved note, so the notepad can reopen with its contents.
    pub note: Option<NoteData>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    titles: BTreeMap<usize, String>,
    tags: TagAnnotations,
    notes: BTreeMap<usize, NoteData>,
}

fn ensure_index(index: usize, history_len: usize) -> Result<()> {
    if index >= history_len {
        bail!("no interval at index {index} (history has {history_len} entries)");
    }
    Ok(())
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &TagAnnotations {
        &self.tags
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(&index).map(String::as_str)
    }

    pub fn note(&self, index: usize) -> Option<&NoteData> {
        self.notes.get(&index)
    }

    /// Notes in ascending index order.
    pub fn notes(&self) -> impl Iterator<Item = (usize, &NoteData)> {
        self.notes.iter().map(|(index, note)| (*index, note))
    }

    pub fn set_title(&mut self, index: usize, history_len: usize, title: String) -> Result<()> {
        ensure_index(index, history_len)?;
        self.titles.insert(index, title);
        Ok(())
    }

    pub fn set_tags(&mut self, index: usize, history_len: usize, tags: String) -> Result<()> {
        ensure_index(index, history_len)?;
        self.tags.set(index, tags);
        Ok(())
    }

    /// Stores the note; a non-blank first line of the main ideas replaces the title.
    pub fn save_note(&mut self, index: usize, history_len: usize, note: NoteData) -> Result<()> {
        ensure_index(index, history_len)?;
        if let Some(headline) = note.headline() {
            self.titles.insert(index, headline.to_string());
        }
        self.notes.insert(index, note);
        Ok(())
    }

    pub fn row(&self, index: usize, record: &IntervalRecord) -> HistoryRow {
        let note = self.note(index).cloned();
        HistoryRow {
            index,
            record: record.clone(),
            clock: format_clock(&record.committed_at.with_timezone(&Local)),
            elapsed_display: format_duration(record.elapsed_secs as i64),
            title: self.title(index).map(str::to_string),
            tags: self.tags.get(index).map(str::to_string),
            has_note: note.is_some(),
            note,
        }
    }

    pub fn rows(&self, history: &History) -> Vec<HistoryRow> {
        history
            .iter()
            .enumerate()
            .map(|(index, record)| self.row(index, record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalKind;
    use chrono::Utc;

    fn history(len: usize) -> History {
        (0..len)
            .map(|i| IntervalRecord::new(IntervalKind::Interval, Utc::now(), i as u64 * 10))
            .collect()
    }

    #[test]
    fn writes_past_the_history_are_rejected() {
        let mut log = ActivityLog::new();
        assert!(log.set_tags(0, 0, "#work".into()).is_err());
        assert!(log.set_title(3, 2, "late".into()).is_err());
        assert!(log.save_note(2, 2, NoteData::default()).is_err());
        assert!(log.tags().get(0).is_none());
    }

    #[test]
    fn tags_are_replaced_not_appended() {
        let mut log = ActivityLog::new();
        log.set_tags(0, 1, "#work".into()).unwrap();
        log.set_tags(0, 1, "#home".into()).unwrap();
        assert_eq!(log.tags().get(0), Some("#home"));
    }

    #[test]
    fn saving_a_note_retitles_the_activity() {
        let mut log = ActivityLog::new();
        log.set_title(0, 1, "typed title".into()).unwrap();
        log.save_note(
            0,
            1,
            NoteData {
                main_ideas: "Sketch the parser\nand its tests".into(),
                detailed_notes: "longer text".into(),
            },
        )
        .unwrap();

        assert_eq!(log.title(0), Some("Sketch the parser"));
        assert_eq!(log.note(0).map(|n| n.detailed_notes.as_str()), Some("longer text"));
    }

    #[test]
    fn note_without_main_ideas_keeps_title() {
        let mut log = ActivityLog::new();
        log.set_title(0, 1, "typed title".into()).unwrap();
        log.save_note(
            0,
            1,
            NoteData {
                main_ideas: "   ".into(),
                detailed_notes: "only details".into(),
            },
        )
        .unwrap();

        assert_eq!(log.title(0), Some("typed title"));
    }

    #[test]
    fn rows_mirror_history_with_annotations() {
        let history = history(3);
        let mut log = ActivityLog::new();
        log.set_tags(1, 3, "#focus".into()).unwrap();
        log.save_note(2, 3, NoteData::default()).unwrap();

        let rows = log.rows(&history);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tags, None);
        assert_eq!(rows[1].tags.as_deref(), Some("#focus"));
        assert_eq!(rows[1].record.elapsed_secs, 10);
        assert_eq!(rows[1].elapsed_display, "00:10");
        assert!(rows[1].clock.ends_with('M'));
        assert!(rows[2].has_note);
        assert!(!rows[0].has_note);
    }

    #[test]
    fn saved_note_contents_come_back_with_the_row() {
        let history = history(1);
        let mut log = ActivityLog::new();
        let note = NoteData {
            main_ideas: "Idea".into(),
            detailed_notes: "Long text".into(),
        };
        log.save_note(0, 1, note.clone()).unwrap();

        let rows = log.rows(&history);
        assert_eq!(rows[0].note.as_ref(), Some(&note));
        assert_eq!(rows[0].title.as_deref(), Some("Idea"));

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["note"]["mainIdeas"], "Idea");
        assert_eq!(json["note"]["detailedNotes"], "Long text");
    }
}
