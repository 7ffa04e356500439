use serde::Serialize;

use crate::models::IntervalRecord;

use super::TimerSnapshot;

/// Notifications pushed from the controller to whatever renders it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerEvent {
    StateChanged { snapshot: TimerSnapshot },
    Tick { snapshot: TimerSnapshot },
    IntervalCommitted { index: usize, record: IntervalRecord },
}

impl TimerEvent {
    /// Channel name the webview listens on.
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::StateChanged { .. } => "timer-state-changed",
            TimerEvent::Tick { .. } => "timer-tick",
            TimerEvent::IntervalCommitted { .. } => "interval-committed",
        }
    }
}

pub trait TimerEventSink: Send + Sync + 'static {
    fn emit(&self, event: TimerEvent);
}
