use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::timer::{History, RunningState};

/// Free-text tag strings keyed by history index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TagAnnotations {
    by_index: BTreeMap<usize, String>,
}

impl TagAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    /// Replaces whatever annotation the index had.
    pub fn set(&mut self, index: usize, annotation: impl Into<String>) {
        self.by_index.insert(index, annotation.into());
    }

    /// Annotations in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.by_index.iter().map(|(index, text)| (*index, text.as_str()))
    }

    fn matches(&self, index: usize, query: &str) -> bool {
        self.get(index).map_or(false, |text| text.contains(query))
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for TagAnnotations {
    fn from_iter<T: IntoIterator<Item = (usize, S)>>(iter: T) -> Self {
        Self {
            by_index: iter.into_iter().map(|(i, s)| (i, s.into())).collect(),
        }
    }
}

/// Seconds attributed to `query` across the history, plus the running
/// interval when the latest record carries the tag.
///
/// Matching is plain substring containment on the annotation, so `wor`
/// matches `#work`. Between two matching records the gain in elapsed time is
/// added, floored at zero. The running credit at the end is added as-is and
/// may pull the total below zero.
pub fn compute_tag_time(
    history: &History,
    annotations: &TagAnnotations,
    running: &RunningState,
    query: &str,
) -> i64 {
    let query = query.trim();
    if query.is_empty() {
        return 0;
    }

    let mut total: i64 = 0;
    let mut previous_elapsed: Option<i64> = None;

    for (index, record) in history.iter().enumerate() {
        if !annotations.matches(index, query) {
            continue;
        }
        let elapsed = record.elapsed_secs as i64;
        if let Some(previous) = previous_elapsed {
            total += (elapsed - previous).max(0);
        }
        previous_elapsed = Some(elapsed);
    }

    let latest_matches = history
        .len()
        .checked_sub(1)
        .map_or(false, |last| annotations.matches(last, query));

    // No clamp here, unlike the deltas above.
    if let (true, true, Some(previous)) = (running.is_active, latest_matches, previous_elapsed) {
        total += running.elapsed_secs as i64 - previous;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IntervalKind, IntervalRecord};
    use chrono::{TimeZone, Utc};

    fn history(elapsed: &[u64]) -> History {
        elapsed
            .iter()
            .enumerate()
            .map(|(i, secs)| {
                let at = Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap();
                IntervalRecord::new(IntervalKind::Interval, at, *secs)
            })
            .collect()
    }

    fn idle() -> RunningState {
        RunningState::default()
    }

    fn running(elapsed_secs: u64) -> RunningState {
        RunningState {
            is_active: true,
            elapsed_secs,
        }
    }

    #[test]
    fn two_tagged_records_credit_the_gain() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(0, "#work"), (1, "#work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#work"), 15);
    }

    #[test]
    fn running_credit_is_not_clamped() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(0, "#work"), (1, "#work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(20), "#work"), -10);
    }

    #[test]
    fn running_credit_adds_when_ahead() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(0, "#work"), (1, "#work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(50), "#work"), 20);
    }

    #[test]
    fn decreasing_elapsed_between_matches_adds_nothing() {
        let history = history(&[50, 10, 25]);
        let tags: TagAnnotations = [(0, "#a"), (1, "#a"), (2, "#a")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#a"), 15);
    }

    #[test]
    fn unmatched_tag_yields_zero() {
        let history = history(&[30, 45, 60, 90]);
        let tags: TagAnnotations = [(0, "#work"), (2, "#home")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(12), "#gym"), 0);
    }

    #[test]
    fn blank_query_short_circuits() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(0, "#work"), (1, "#work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(99), ""), 0);
        assert_eq!(compute_tag_time(&history, &tags, &running(99), "   "), 0);
    }

    #[test]
    fn single_match_without_running_credit_is_zero() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(0, "#solo")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(90), "#solo"), 0);
    }

    #[test]
    fn single_latest_match_gets_running_credit() {
        let history = history(&[30, 45]);
        let tags: TagAnnotations = [(1, "#solo")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(60), "#solo"), 15);
        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#solo"), 0);
    }

    #[test]
    fn matching_is_substring_based() {
        let history = history(&[10, 40]);
        let tags: TagAnnotations = [(0, "#work #urgent"), (1, "deep #work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#work"), 30);
        assert_eq!(compute_tag_time(&history, &tags, &idle(), "wor"), 30);
        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#wo"), 30);
        assert_eq!(compute_tag_time(&history, &tags, &idle(), "#urgent"), 0);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let history = history(&[10, 40]);
        let tags: TagAnnotations = [(0, "#work"), (1, "#work")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &idle(), "  #work "), 30);
    }

    #[test]
    fn annotations_past_the_history_are_ignored() {
        let history = history(&[10]);
        let tags: TagAnnotations = [(0, "#x"), (5, "#x")].into_iter().collect();

        assert_eq!(compute_tag_time(&history, &tags, &running(40), "#x"), 30);
    }

    #[test]
    fn empty_history_is_zero() {
        let tags = TagAnnotations::new();
        assert_eq!(compute_tag_time(&History::default(), &tags, &running(5), "#x"), 0);
    }
}
