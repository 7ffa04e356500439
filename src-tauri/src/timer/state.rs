use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{IntervalKind, IntervalRecord};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    /// Inactive with a zero counter, right after a pause committed an interval.
    Paused,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// The live, not yet committed part of the stopwatch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunningState {
    pub is_active: bool,
    pub elapsed_secs: u64,
}

/// Append-only log of committed intervals, in commit order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    records: Vec<IntervalRecord>,
}

impl History {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IntervalRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntervalRecord> {
        self.records.iter()
    }

    fn push(&mut self, record: IntervalRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }
}

impl FromIterator<IntervalRecord> for History {
    fn from_iter<T: IntoIterator<Item = IntervalRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a IntervalRecord;
    type IntoIter = std::slice::Iter<'a, IntervalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Stopwatch state machine. Every method is a total transition; the ones
/// that cannot apply in the current state leave it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub elapsed_secs: u64,
    pub history: History,
    /// Bumped on every start so a tick source from an earlier run can be told apart.
    #[serde(skip)]
    run_epoch: u64,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn run_epoch(&self) -> u64 {
        self.run_epoch
    }

    pub fn running(&self) -> RunningState {
        RunningState {
            is_active: self.is_active(),
            elapsed_secs: self.elapsed_secs,
        }
    }

    /// Returns `false` when already running.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.status = TimerStatus::Running;
        self.run_epoch = self.run_epoch.wrapping_add(1);
        true
    }

    /// Returns `false` (and counts nothing) unless running.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    /// Commits the running interval. Returns the new record and its index.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<(usize, IntervalRecord)> {
        if !self.is_active() {
            return None;
        }
        let record = IntervalRecord::new(IntervalKind::Interval, now, self.elapsed_secs);
        let index = self.history.push(record.clone());
        self.status = TimerStatus::Paused;
        self.elapsed_secs = 0;
        Some((index, record))
    }

    /// Always ends idle; commits a `Complete` record only when a non-zero
    /// interval was running.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<(usize, IntervalRecord)> {
        let committed = if self.is_active() && self.elapsed_secs != 0 {
            let record = IntervalRecord::new(IntervalKind::Complete, now, self.elapsed_secs);
            let index = self.history.push(record.clone());
            Some((index, record))
        } else {
            None
        };
        self.status = TimerStatus::Idle;
        self.elapsed_secs = 0;
        committed
    }
}
