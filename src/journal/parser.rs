use pulldown_cmark::{Event, HeadingLevel, Tag};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    cmark::EventCursor,
    error::{Error, Result},
    model::{JournalEntry, Status},
};

/// Heading prefix that marks the start of a revision entry.
const REVISION_MARKER: &str = "Revision ";

/// In-memory representation of a parsed `journal.md`.
///
/// The free-form header is never materialized beyond its title; the append
/// path works on the raw file and leaves the header untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// The first H1 of the header, if the journal starts with one.
    pub title: Option<String>,
    /// All revision entries, in file order.
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    /// The status of the last entry in file order, `WIP` when no entry has
    /// been recorded yet. File order wins over revision numbers.
    pub fn current_status(&self) -> Status {
        self.entries
            .last()
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// The revision number the next appended entry must carry.
    pub fn next_revision(&self) -> u32 {
        self.entries.len() as u32 + 1
    }
}

impl FromStr for Journal {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        JournalParser::new(source).parse()
    }
}

struct JournalParser<'a> {
    cursor: EventCursor<'a>,
}

impl<'a> JournalParser<'a> {
    fn new(source: &str) -> JournalParser<'_> {
        let cursor = EventCursor::new(source);

        JournalParser { cursor }
    }

    fn parse(mut self) -> Result<Journal> {
        let title = self.parse_title();
        let entries = self.parse_entries()?;

        Ok(Journal { title, entries })
    }

    /// The title is the H1 the journal opens with, if any. Scaffolded
    /// journals may carry HTML comments above it.
    fn parse_title(&mut self) -> Option<String> {
        while matches!(self.cursor.peek(), Some(Event::Html(_))) {
            self.cursor.advance();
        }

        match self.cursor.peek() {
            Some(Event::Start(Tag::Heading(HeadingLevel::H1, ..))) => {
                self.cursor.advance();
                let title = self.cursor.text_until(|event| {
                    matches!(event, Event::End(Tag::Heading(HeadingLevel::H1, ..)))
                });

                Some(title)
            }
            _ => None,
        }
    }

    fn parse_entries(&mut self) -> Result<Vec<JournalEntry>> {
        let mut entries = Vec::new();

        loop {
            match self.cursor.advance() {
                Some(Event::Start(Tag::Heading(HeadingLevel::H3, ..))) => {
                    let heading = self.cursor.text_until(|event| {
                        matches!(event, Event::End(Tag::Heading(HeadingLevel::H3, ..)))
                    });

                    // H3 headings without the revision marker belong to the
                    // free-form header and are skipped.
                    if let Some(rest) = heading.strip_prefix(REVISION_MARKER) {
                        let (revision, timestamp) = self.parse_revision_heading(rest)?;
                        let entry = self.parse_entry_body(revision, timestamp)?;
                        entries.push(entry);
                    }
                }
                Some(_) => (),
                None => break,
            }
        }

        Ok(entries)
    }

    /// Parses the remainder of a `Revision <n> – <timestamp>` heading,
    /// after the marker prefix has been stripped.
    fn parse_revision_heading(&self, rest: &str) -> Result<(u32, String)> {
        let Some((number, timestamp)) = rest.split_once(" – ") else {
            return Err(Error::malformed(
                self.cursor.position(),
                format!("expected `Revision <n> – <timestamp>`, found `Revision {rest}`"),
            ));
        };

        let revision = number.trim().parse::<u32>().map_err(|_| {
            Error::malformed(
                self.cursor.position(),
                format!("invalid revision number `{number}`"),
            )
        })?;

        Ok((revision, timestamp.trim().to_string()))
    }

    fn parse_entry_body(&mut self, revision: u32, timestamp: String) -> Result<JournalEntry> {
        let mut status = None;
        let mut changes = Vec::new();

        loop {
            if matches!(
                self.cursor.peek(),
                Some(Event::Start(Tag::Heading(..))) | None
            ) {
                break;
            }

            match self.cursor.advance() {
                Some(Event::Start(Tag::Strong)) => {
                    let label = self
                        .cursor
                        .text_until(|event| matches!(event, Event::End(Tag::Strong)));

                    // `Changes:` carries no inline value; its bullets follow
                    // as list items.
                    if label == "Status:" {
                        if status.is_some() {
                            return Err(Error::malformed(
                                self.cursor.position(),
                                format!("revision {revision} has more than one `**Status:**` line"),
                            ));
                        }

                        status = Some(self.parse_status_value()?);
                    }
                }
                Some(Event::Start(Tag::Item)) => {
                    let change = self
                        .cursor
                        .text_until(|event| matches!(event, Event::End(Tag::Item)));
                    let change = change.trim();

                    if !change.is_empty() {
                        changes.push(change.to_string());
                    }
                }
                _ => (),
            }
        }

        let Some(status) = status else {
            return Err(Error::malformed(
                self.cursor.position(),
                format!("revision {revision} has no `**Status:**` line"),
            ));
        };

        Ok(JournalEntry {
            revision,
            timestamp,
            status,
            changes,
        })
    }

    fn parse_status_value(&mut self) -> Result<Status> {
        match self.cursor.advance() {
            Some(Event::Text(value)) => {
                let value = value.trim();

                value.parse().map_err(|_| {
                    Error::malformed(
                        self.cursor.position(),
                        format!("unknown status `{value}`"),
                    )
                })
            }
            _ => Err(Error::malformed(
                self.cursor.position(),
                "missing status value",
            )),
        }
    }
}
