#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod events;
pub mod state;
pub mod ticker;

pub use controller::{TagTimeResult, TimerController, TimerSnapshot};
pub use events::{TimerEvent, TimerEventSink};
pub use state::{History, RunningState, TimerState, TimerStatus};
pub use ticker::TickerHandle;
