mod parser;
mod store;

pub use parser::Journal;
pub use store::JournalStore;

/// File name of the journal inside a project folder.
pub const JOURNAL_FILE: &str = "journal.md";
