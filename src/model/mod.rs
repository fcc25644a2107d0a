mod entry;

pub use entry::{JournalEntry, Status};
