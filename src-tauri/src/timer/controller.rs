use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    activity::{group_notes_by_tag, ActivityLog, HistoryRow},
    models::{IntervalRecord, NoteData, TagNoteGroup},
    tags::compute_tag_time,
    utils::format_duration,
};

use super::{
    events::{TimerEvent, TimerEventSink},
    ticker::TickerHandle,
    RunningState, TimerState, TimerStatus,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub is_active: bool,
    pub elapsed_secs: u64,
    pub display: String,
    pub history_len: usize,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            status: state.status,
            is_active: state.is_active(),
            elapsed_secs: state.elapsed_secs,
            display: format_duration(state.elapsed_secs as i64),
            history_len: state.history.len(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagTimeResult {
    pub tag: String,
    pub total_secs: i64,
    pub display: String,
}

/// Owns the stopwatch, its tick source and the per-interval annotations.
/// Cloning shares the same timer.
///
/// Locks are always taken in the order state, then ticker or activity.
/// Events are emitted while the state lock is held, so they arrive in
/// transition order.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    activity: Arc<Mutex<ActivityLog>>,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    events: Arc<dyn TimerEventSink>,
    tick_interval: Duration,
    log_every_tick: bool,
}

impl TimerController {
    pub fn new(events: Arc<dyn TimerEventSink>) -> Self {
        let debug_mode = std::env::var("TAGTIMER_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            activity: Arc::new(Mutex::new(ActivityLog::new())),
            ticker: Arc::new(Mutex::new(None)),
            events,
            tick_interval: Duration::from_secs(1),
            log_every_tick: debug_mode,
        }
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&*self.state.lock().await)
    }

    pub async fn running_state(&self) -> RunningState {
        self.state.lock().await.running()
    }

    pub async fn history_rows(&self) -> Vec<HistoryRow> {
        let state = self.state.lock().await;
        let activity = self.activity.lock().await;
        activity.rows(&state.history)
    }

    /// Starts or resumes. A second call while running changes nothing and
    /// arms no second tick source.
    pub async fn start(&self) -> TimerSnapshot {
        let mut state = self.state.lock().await;
        if !state.start() {
            log_debug!("start ignored, timer already running");
            return TimerSnapshot::from(&*state);
        }
        self.spawn_ticker(state.run_epoch()).await;

        let snapshot = TimerSnapshot::from(&*state);
        log_info!("timer started ({} intervals so far)", snapshot.history_len);
        self.events.emit(TimerEvent::StateChanged {
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    /// Commits the running interval and returns its row. `None` when the
    /// timer was not running.
    pub async fn pause(&self) -> Option<HistoryRow> {
        let mut state = self.state.lock().await;
        let Some((index, record)) = state.pause(Utc::now()) else {
            log_debug!("pause ignored, timer not running");
            return None;
        };
        self.cancel_ticker().await;

        log_info!("interval {} committed after {}s", index, record.elapsed_secs);
        let row = self.activity.lock().await.row(index, &record);
        self.emit_committed(index, record);
        self.events.emit(TimerEvent::StateChanged {
            snapshot: TimerSnapshot::from(&*state),
        });
        Some(row)
    }

    /// Stops and clears the counter, committing a `Complete` record when a
    /// non-zero interval was running.
    pub async fn reset(&self) -> Option<HistoryRow> {
        let mut state = self.state.lock().await;
        let committed = state.reset(Utc::now());
        self.cancel_ticker().await;

        let row = match committed {
            Some((index, record)) => {
                log_info!("interval {} completed after {}s", index, record.elapsed_secs);
                let row = self.activity.lock().await.row(index, &record);
                self.emit_committed(index, record);
                Some(row)
            }
            None => None,
        };
        self.events.emit(TimerEvent::StateChanged {
            snapshot: TimerSnapshot::from(&*state),
        });
        row
    }

    pub async fn set_activity_title(&self, index: usize, title: String) -> Result<()> {
        let state = self.state.lock().await;
        let mut activity = self.activity.lock().await;
        activity.set_title(index, state.history.len(), title)
    }

    pub async fn set_activity_tags(&self, index: usize, tags: String) -> Result<()> {
        let state = self.state.lock().await;
        let mut activity = self.activity.lock().await;
        activity.set_tags(index, state.history.len(), tags)
    }

    pub async fn save_note(&self, index: usize, note: NoteData) -> Result<()> {
        let state = self.state.lock().await;
        let mut activity = self.activity.lock().await;
        activity.save_note(index, state.history.len(), note)
    }

    /// Total time for `query`, or `None` for a blank query.
    pub async fn search_tag(&self, query: &str) -> Option<TagTimeResult> {
        let tag = query.trim();
        if tag.is_empty() {
            return None;
        }

        let state = self.state.lock().await;
        let activity = self.activity.lock().await;
        let total_secs = compute_tag_time(&state.history, activity.tags(), &state.running(), tag);

        Some(TagTimeResult {
            tag: tag.to_string(),
            total_secs,
            display: format_duration(total_secs),
        })
    }

    pub async fn notes_by_tag(&self, filter: &str) -> Vec<TagNoteGroup> {
        let state = self.state.lock().await;
        let activity = self.activity.lock().await;
        group_notes_by_tag(&state.history, &activity, filter)
    }

    /// Leaves `Running` before the app exits, committing the open interval
    /// like a reset does. The controller stays usable afterwards.
    pub async fn shutdown(&self) -> Option<HistoryRow> {
        log_info!("timer shutting down");
        self.reset().await
    }

    async fn spawn_ticker(&self, epoch: u64) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(previous) = ticker_guard.take() {
            previous.stop();
        }

        let state = self.state.clone();
        let events = self.events.clone();
        let log_every_tick = self.log_every_tick;

        let handle = TickerHandle::spawn(self.tick_interval, move || {
            let state = state.clone();
            let events = events.clone();
            async move {
                let mut guard = state.lock().await;
                // A tick that lost the race against pause/reset/restart counts nothing.
                if guard.run_epoch() != epoch || !guard.tick() {
                    return false;
                }

                let snapshot = TimerSnapshot::from(&*guard);
                if log_every_tick {
                    log_debug!("tick {}", snapshot.display);
                }
                // Emitted under the lock so a later pause cannot overtake it.
                events.emit(TimerEvent::Tick { snapshot });
                true
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.stop();
        }
    }

    fn emit_committed(&self, index: usize, record: IntervalRecord) {
        self.events.emit(TimerEvent::IntervalCommitted { index, record });
    }
}
