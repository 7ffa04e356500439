#[cfg(feature = "desktop")]
pub mod commands;
pub mod ledger;
pub mod notes;

pub use ledger::{ActivityLog, HistoryRow};
pub use notes::group_notes_by_tag;
