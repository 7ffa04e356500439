pub mod interval;
pub mod note;

pub use interval::{IntervalKind, IntervalRecord};
pub use note::{NoteData, NoteEntry, TagNoteGroup, UNTAGGED};
