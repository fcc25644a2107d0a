use chrono::{DateTime, Local, TimeZone};
use std::fmt;

use crate::{
    error::Result,
    journal::{Journal, JournalStore},
    model::{JournalEntry, Status},
};

/// Location code used when none is supplied.
pub const DEFAULT_LOCATION: &str = "EARTH";

/// Outcome of submitting a composed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The entry was confirmed and written to the journal.
    Appended(JournalEntry),
    /// The confirm collaborator declined; nothing was written.
    Discarded,
}

/// Collects the raw fields of one new entry and resolves them against the
/// journal's recorded history before anything is written.
///
/// All inputs are optional: a blank status carries the journal's current
/// status forward, a blank location defaults to [`DEFAULT_LOCATION`], and a
/// blank change list produces an entry with no bullets.
pub struct EntryBuilder {
    status: String,
    changes: String,
    location: String,
    now: DateTime<Local>,
}

impl EntryBuilder {
    pub fn new() -> Self {
        EntryBuilder {
            status: String::new(),
            changes: String::new(),
            location: String::new(),
            now: Local::now(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_changes(mut self, changes: impl Into<String>) -> Self {
        self.changes = changes.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_time(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Resolves all fields into a fully-formed entry. Pure with respect to
    /// the file; fails with `InvalidStatus` before anything is rendered.
    pub fn compose(&self, journal: &Journal) -> Result<JournalEntry> {
        let status = resolve_status(&self.status, journal.current_status())?;

        Ok(JournalEntry {
            revision: journal.next_revision(),
            timestamp: timestamp(self.now, &self.location),
            status,
            changes: parse_changes(&self.changes),
        })
    }

    /// Composes and renders the entry, asks the confirm collaborator, and
    /// appends on acceptance. A validation failure aborts the whole
    /// operation with no write; a declined confirmation discards the entry.
    pub fn submit<F>(self, store: &JournalStore, confirm: F) -> Result<Submission>
    where
        F: FnOnce(&str) -> bool,
    {
        let journal = store.load()?;
        let entry = self.compose(&journal)?;
        let rendered = render(&entry);

        if !confirm(&rendered) {
            return Ok(Submission::Discarded);
        }

        store.append(&rendered)?;

        Ok(Submission::Appended(entry))
    }
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Carries the previous status forward on blank input, otherwise parses the
/// input case-insensitively.
pub fn resolve_status(input: &str, previous: Status) -> Result<Status> {
    if input.trim().is_empty() {
        Ok(previous)
    } else {
        input.parse()
    }
}

/// Splits a comma-separated change list, trimming each piece and dropping
/// empties. Order and duplicates are preserved.
pub fn parse_changes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS±HH:MM@LOCATION`. A blank or
/// whitespace-only location defaults to [`DEFAULT_LOCATION`].
pub fn timestamp<Tz>(now: DateTime<Tz>, location: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let location = location.trim();
    let location = if location.is_empty() {
        DEFAULT_LOCATION
    } else {
        location
    };

    format!("{}@{}", now.format("%Y-%m-%dT%H:%M:%S%:z"), location)
}

/// Renders an entry as the exact block appended to the journal: a blank
/// line, the revision heading, the status line, and the changes header
/// followed by one bullet per change (zero bullets when there are none).
pub fn render(entry: &JournalEntry) -> String {
    let mut block = format!(
        "\n### Revision {} – {}\n**Status:** {}\n**Changes:**\n",
        entry.revision, entry.timestamp, entry.status
    );

    for change in &entry.changes {
        block.push_str("- ");
        block.push_str(change);
        block.push('\n');
    }

    block
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use chrono::FixedOffset;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .expect("offset was out of range")
            .with_ymd_and_hms(2026, 8, 30, 12, 0, 0)
            .single()
            .expect("timestamp was ambiguous")
    }

    #[test]
    fn blank_status_carries_the_previous_status_forward() {
        let status = resolve_status("  ", Status::Beta).expect("status failed to resolve");

        assert_eq!(Status::Beta, status);
    }

    #[test]
    fn explicit_status_is_parsed_case_insensitively() {
        let status = resolve_status("r", Status::Wip).expect("status failed to resolve");

        assert_eq!(Status::Released, status);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = resolve_status("bogus", Status::Wip);

        assert!(matches!(result, Err(Error::InvalidStatus(_))));
    }

    #[test]
    fn parse_changes_trims_and_drops_empty_pieces() {
        assert_eq!(vec!["a", "b"], parse_changes(" a , ,b ,"));
    }

    #[test]
    fn parse_changes_preserves_order_and_duplicates() {
        assert_eq!(vec!["a", "a", "b"], parse_changes("a,a,b"));
        assert!(parse_changes("  ").is_empty());
    }

    #[test]
    fn timestamp_combines_offset_and_location() {
        assert_eq!(
            "2026-08-30T12:00:00+02:00@MARS",
            timestamp(fixed_time(), "MARS")
        );
    }

    #[test]
    fn timestamp_defaults_blank_location_to_earth() {
        assert_eq!(
            "2026-08-30T12:00:00+02:00@EARTH",
            timestamp(fixed_time(), "  ")
        );
    }

    #[test]
    fn renders_the_exact_entry_block() {
        let entry = JournalEntry {
            revision: 3,
            timestamp: String::from("2026-08-30T12:00:00+02:00@EARTH"),
            status: Status::Complete,
            changes: vec![String::from("Fixed parser"), String::from("Added docs")],
        };

        let expected = "\n### Revision 3 – 2026-08-30T12:00:00+02:00@EARTH\n\
                        **Status:** C\n\
                        **Changes:**\n\
                        - Fixed parser\n\
                        - Added docs\n";

        assert_eq!(expected, render(&entry));
    }

    #[test]
    fn renders_the_changes_header_even_without_changes() {
        let entry = JournalEntry {
            revision: 1,
            timestamp: String::from("2026-08-30T12:00:00+02:00@EARTH"),
            status: Status::Wip,
            changes: Vec::new(),
        };

        let expected = "\n### Revision 1 – 2026-08-30T12:00:00+02:00@EARTH\n\
                        **Status:** WIP\n\
                        **Changes:**\n";

        assert_eq!(expected, render(&entry));
    }

    #[test]
    fn rendered_entries_parse_back_with_the_same_count_and_status() {
        let first = JournalEntry {
            revision: 1,
            timestamp: String::from("2026-08-30T12:00:00+02:00@EARTH"),
            status: Status::Beta,
            changes: vec![String::from("One")],
        };
        let second = JournalEntry {
            revision: 2,
            timestamp: String::from("2026-08-30T13:00:00+02:00@EARTH"),
            status: Status::Released,
            changes: Vec::new(),
        };

        let text = format!("# Tracker\n{}{}", render(&first), render(&second));
        let journal: Journal = text.parse().expect("journal failed to parse");

        assert_eq!(2, journal.entries.len());
        assert_eq!(Status::Released, journal.current_status());
        assert_eq!(vec![first, second], journal.entries);
    }

    #[test]
    fn compose_assigns_the_next_revision_number() {
        let journal: Journal = "# Tracker\n\n### Revision 1 – t\n**Status:** C\n**Changes:**\n"
            .parse()
            .expect("journal failed to parse");

        let entry = EntryBuilder::new()
            .with_changes("a,b")
            .compose(&journal)
            .expect("entry failed to compose");

        assert_eq!(2, entry.revision);
        assert_eq!(Status::Complete, entry.status);
        assert_eq!(vec!["a", "b"], entry.changes);
    }
}
