pub mod aggregate;
pub mod parse;

pub use aggregate::{compute_tag_time, TagAnnotations};
pub use parse::{annotation_hashtags, title_hashtags};
