pub mod format;
pub mod logging;

pub use format::{format_clock, format_duration, format_elapsed_short};
pub use logging::init_logging;
