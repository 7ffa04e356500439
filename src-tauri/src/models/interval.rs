//! Interval history models.
//!
//! An `IntervalRecord` is written once, when a running stopwatch is paused
//! or reset, and never changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IntervalKind {
    /// Committed by a pause in the middle of a task.
    Interval,
    /// Committed by a reset while the stopwatch was running.
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    pub kind: IntervalKind,
    pub committed_at: DateTime<Utc>,
    /// Ticks counted since the previous commit (or start).
    pub elapsed_secs: u64,
}

impl IntervalRecord {
    pub fn new(kind: IntervalKind, committed_at: DateTime<Utc>, elapsed_secs: u64) -> Self {
        Self {
            kind,
            committed_at,
            elapsed_secs,
        }
    }
}
