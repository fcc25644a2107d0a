//! Cursor over CommonMark event streams, shaped around what the journal
//! format needs: extracting heading, label, and bullet text, and reporting
//! where a malformed entry starts.

use pulldown_cmark::{Event, OffsetIter, Parser};
use std::{iter::Peekable, ops::Range};

/// Line and column of a consumed event, both 1-based.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A peekable cursor over a `pulldown_cmark` event stream.
///
/// Remembers the byte range of the last consumed event so parse errors can
/// point at a source position.
pub struct EventCursor<'a> {
    source: &'a str,
    events: Peekable<OffsetIter<'a, 'a>>,
    last_range: Range<usize>,
}

impl<'a> EventCursor<'a> {
    pub fn new(source: &str) -> EventCursor<'_> {
        EventCursor {
            source,
            events: Parser::new(source).into_offset_iter().peekable(),
            last_range: 0..0,
        }
    }

    /// Line and column of the last consumed event.
    pub fn position(&self) -> Position {
        let consumed = &self.source.as_bytes()[..self.last_range.start];
        let line = memchr::Memchr::new(b'\n', consumed).count() + 1;
        let line_start = memchr::memrchr(b'\n', consumed).map_or(0, |index| index + 1);
        let column = self.source[line_start..self.last_range.start].chars().count() + 1;

        Position { line, column }
    }

    /// Peek the next event without consuming it.
    pub fn peek(&mut self) -> Option<&Event<'a>> {
        self.events.peek().map(|(event, _)| event)
    }

    /// Consume and return the next event.
    pub fn advance(&mut self) -> Option<Event<'a>> {
        let (event, range) = self.events.next()?;
        self.last_range = range;

        Some(event)
    }

    /// Consume events up to and including the first one matching the
    /// delimiter, returning the concatenated plain text of everything before
    /// it. Inline markup is flattened; soft and hard breaks become spaces.
    pub fn text_until(&mut self, delimiter: impl Fn(&Event<'a>) -> bool) -> String {
        let mut text = String::new();

        while let Some(event) = self.advance() {
            if delimiter(&event) {
                break;
            }

            match event {
                Event::Text(piece) | Event::Code(piece) => text.push_str(&piece),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => (),
            }
        }

        text
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pulldown_cmark::{HeadingLevel, Tag};

    fn advance_to_heading(cursor: &mut EventCursor<'_>) {
        loop {
            match cursor.advance() {
                Some(Event::Start(Tag::Heading(..))) | None => break,
                Some(_) => (),
            }
        }
    }

    #[test]
    fn text_until_flattens_inline_markup() {
        let mut cursor = EventCursor::new("some `inline` *text*");
        cursor.advance(); // paragraph start

        let text = cursor.text_until(|event| matches!(event, Event::End(Tag::Paragraph)));

        assert_eq!("some inline text", text);
    }

    #[test]
    fn text_until_consumes_the_delimiter() {
        let mut cursor = EventCursor::new("# title\n\nbody");
        cursor.advance(); // heading start

        let title = cursor.text_until(|event| {
            matches!(event, Event::End(Tag::Heading(HeadingLevel::H1, ..)))
        });

        assert_eq!("title", title);
        assert!(matches!(cursor.peek(), Some(Event::Start(Tag::Paragraph))));
    }

    #[test]
    fn position_is_one_based_on_the_first_line() {
        let mut cursor = EventCursor::new("## heading");
        advance_to_heading(&mut cursor);

        let position = cursor.position();
        assert_eq!(1, position.line);
        assert_eq!(1, position.column);
    }

    #[test]
    fn position_columns_stay_one_based_on_later_lines() {
        let mut cursor = EventCursor::new("first line\n\n## heading");
        advance_to_heading(&mut cursor);

        let position = cursor.position();
        assert_eq!(3, position.line);
        assert_eq!(1, position.column);
    }
}
