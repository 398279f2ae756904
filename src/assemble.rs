//! Message assembly.
//!
//! Classification sees one physical line at a time; assembly stitches
//! continuation lines onto the message that opened them and emits completed
//! [`MessageRecord`]s in source order. The whole pipeline is lazy: records
//! are produced as lines are consumed, and at most one partial message is
//! buffered at any point.

use crate::classify::{LineOutcome, classify};
use crate::format::{DateOrder, DIRECTION_MARKS, FormatCandidate};
use crate::record::MessageRecord;

/// A message opened by a header line, still absorbing continuations.
#[derive(Debug)]
struct Pending {
    timestamp: chrono::NaiveDateTime,
    author: Option<String>,
    body: String,
}

impl Pending {
    fn append(&mut self, text: &str) {
        self.body.push('\n');
        self.body.push_str(text.trim());
    }

    /// Finalizes the buffered message. Direction marks leak into bodies next
    /// to media placeholders; they are removed here. A message whose body
    /// cleans down to nothing is dropped rather than emitted.
    fn into_record(self) -> Option<MessageRecord> {
        let body: String = self
            .body
            .chars()
            .filter(|c| !DIRECTION_MARKS.contains(c))
            .collect();
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        Some(match self.author {
            Some(author) => MessageRecord::user(self.timestamp, author, body),
            None => MessageRecord::system(self.timestamp, body),
        })
    }
}

/// Incremental two-state assembler.
///
/// Feed it classified lines in order, then call [`finish`](Assembler::finish)
/// exactly once. Each call returns the record completed by that step, if any.
#[derive(Debug, Default)]
pub struct Assembler {
    pending: Option<Pending>,
}

impl Assembler {
    /// Creates an assembler awaiting its first header line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one classified line.
    ///
    /// A header outcome flushes the buffered message and opens a new one; a
    /// continuation extends the buffer. Continuations arriving before any
    /// header have nothing to attach to and are discarded.
    pub fn feed(&mut self, outcome: LineOutcome<'_>) -> Option<MessageRecord> {
        match outcome {
            LineOutcome::Message {
                timestamp,
                author,
                body,
            } => {
                let done = self.pending.take();
                self.pending = Some(Pending {
                    timestamp,
                    author: Some(author.to_owned()),
                    body: body.to_owned(),
                });
                done.and_then(Pending::into_record)
            }
            LineOutcome::SystemNotice { timestamp, body } => {
                let done = self.pending.take();
                self.pending = Some(Pending {
                    timestamp,
                    author: None,
                    body: body.to_owned(),
                });
                done.and_then(Pending::into_record)
            }
            LineOutcome::Continuation(text) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.append(text);
                }
                None
            }
        }
    }

    /// Flushes the final buffered message at end of input.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        self.pending.take().and_then(Pending::into_record)
    }
}

/// Lazy iterator over the records of a chat export.
///
/// Produced by [`ChatParser::records`](crate::ChatParser::records). Lines are
/// classified and assembled on demand; memory use is one record plus one
/// line regardless of document size.
#[derive(Debug)]
pub struct RecordIter<'a> {
    lines: std::str::Lines<'a>,
    candidate: &'static FormatCandidate,
    order: DateOrder,
    assembler: Assembler,
    finished: bool,
}

impl<'a> RecordIter<'a> {
    pub(crate) fn new(
        text: &'a str,
        candidate: &'static FormatCandidate,
        order: DateOrder,
    ) -> Self {
        Self {
            lines: text.lines(),
            candidate,
            order,
            assembler: Assembler::new(),
            finished: false,
        }
    }

    /// Returns the format candidate this iterator classifies against.
    pub fn format(&self) -> &'static FormatCandidate {
        self.candidate
    }

    /// Returns the resolved day/month order.
    pub fn date_order(&self) -> DateOrder {
        self.order
    }
}

impl Iterator for RecordIter<'_> {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<MessageRecord> {
        if self.finished {
            return None;
        }
        for line in self.lines.by_ref() {
            let outcome = classify(line, self.candidate, self.order);
            if let Some(record) = self.assembler.feed(outcome) {
                return Some(record);
            }
        }
        self.finished = true;
        self.assembler.finish()
    }
}

impl std::iter::FusedIterator for RecordIter<'_> {}
