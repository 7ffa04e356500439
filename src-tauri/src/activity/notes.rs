use chrono::Local;

use crate::{
    models::{NoteEntry, TagNoteGroup, UNTAGGED},
    tags::annotation_hashtags,
    timer::History,
    utils::{format_clock, format_elapsed_short},
};

use super::ActivityLog;

const UNTITLED: &str = "Untitled";

/// Buckets every saved note under each hashtag of its interval, or under
/// `#untagged`. Tags appear in first-seen order across the annotations with
/// `#untagged` last; a non-empty `filter` keeps tags containing it
/// (case-insensitive). Empty buckets are dropped.
pub fn group_notes_by_tag(history: &History, log: &ActivityLog, filter: &str) -> Vec<TagNoteGroup> {
    let mut groups: Vec<TagNoteGroup> = Vec::new();
    for (_, annotation) in log.tags().iter() {
        for tag in annotation_hashtags(annotation) {
            if !groups.iter().any(|group| group.tag == tag) {
                groups.push(TagNoteGroup {
                    tag: tag.to_string(),
                    notes: Vec::new(),
                });
            }
        }
    }
    if !groups.iter().any(|group| group.tag == UNTAGGED) {
        groups.push(TagNoteGroup {
            tag: UNTAGGED.to_string(),
            notes: Vec::new(),
        });
    }

    for (index, note) in log.notes() {
        let Some(record) = history.get(index) else {
            continue;
        };
        let entry = NoteEntry {
            index,
            committed_at: record.committed_at,
            elapsed_secs: record.elapsed_secs,
            elapsed_label: format_elapsed_short(record.elapsed_secs),
            clock: format_clock(&record.committed_at.with_timezone(&Local)),
            title: log.title(index).unwrap_or(UNTITLED).to_string(),
            note: note.clone(),
        };

        let mut tags = log.tags().get(index).map(annotation_hashtags).unwrap_or_default();
        if tags.is_empty() {
            tags.push(UNTAGGED);
        }

        for tag in tags {
            if let Some(group) = groups.iter_mut().find(|group| group.tag == tag) {
                if !group.notes.iter().any(|existing| existing.index == index) {
                    group.notes.push(entry.clone());
                }
            }
        }
    }

    let filter = filter.to_lowercase();
    groups
        .into_iter()
        .filter(|group| !group.notes.is_empty())
        .filter(|group| filter.is_empty() || group.tag.to_lowercase().contains(&filter))
        .collect()
}
