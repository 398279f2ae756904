//! Output model: message records and the parsed document.
//!
//! This module provides [`MessageRecord`], the unit of parser output, and
//! [`ChatDocument`], the ordered record sequence together with the format and
//! date order that produced it.
//!
//! # Overview
//!
//! A record consists of:
//! - **Required**: `timestamp`, `body`, `kind`
//! - **Optional**: `author` (present for user messages, absent for system
//!   notices)
//!
//! Timestamps are [`chrono::NaiveDateTime`]: chat exports carry no timezone
//! information, and none is invented.
//!
//! # Examples
//!
//! ```
//! use chatwrap::{MessageKind, MessageRecord};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
//!     .and_hms_opt(10, 30, 0).unwrap();
//! let msg = MessageRecord::user(ts, "Alice", "Hello, world!");
//!
//! assert_eq!(msg.author(), Some("Alice"));
//! assert_eq!(msg.kind(), MessageKind::User);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatwrap::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
//!     .and_hms_opt(10, 30, 0).unwrap();
//! let msg = MessageRecord::system(ts, "Alice created group \"Trip\"");
//! let json = serde_json::to_string(&msg)?;
//!
//! // author is omitted (None)
//! assert!(!json.contains("author"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::format::{DateOrder, FormatCandidate};
use crate::media::{self, ContentKind};

/// Whether a record came from a named participant or from the chat system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A message written by a named participant.
    User,
    /// A chat-management notice (group created, member added, ...).
    System,
}

/// A single parsed message from a chat export.
///
/// Records appear in the output sequence in the same order as encountered in
/// the source; the parser never re-sorts. `author` is always `Some` and
/// non-empty when `kind` is [`MessageKind::User`], and always `None` when it
/// is [`MessageKind::System`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Calendar date and time of day, no timezone.
    pub timestamp: NaiveDateTime,

    /// Display name of the message author; `None` for system notices.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub author: Option<String>,

    /// Message text. Multi-line messages are joined with `\n`.
    pub body: String,

    /// User message or system notice.
    pub kind: MessageKind,
}

impl MessageRecord {
    /// Creates a user message record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatwrap::MessageRecord;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    ///     .and_hms_opt(12, 0, 0).unwrap();
    /// let msg = MessageRecord::user(ts, "Alice", "Hello!");
    /// assert!(!msg.is_system());
    /// ```
    pub fn user(
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: Some(author.into()),
            body: body.into(),
            kind: MessageKind::User,
        }
    }

    /// Creates a system notice record (no author).
    pub fn system(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            author: None,
            body: body.into(),
            kind: MessageKind::System,
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author name, if this is a user message.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the record kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns `true` if this record is a system notice.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Classifies the body as text, a media placeholder, or a link.
    ///
    /// See [`media::classify_content`] for the recognition rules.
    pub fn content_kind(&self) -> ContentKind {
        media::classify_content(&self.body)
    }
}

/// Summary information about a parsed chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMetadata {
    /// Total number of records, system notices included.
    pub total_messages: usize,
    /// Number of distinct user-message authors.
    pub total_members: usize,
    /// Earliest timestamp, if any record exists.
    pub date_range_start: Option<NaiveDateTime>,
    /// Latest timestamp, if any record exists.
    pub date_range_end: Option<NaiveDateTime>,
    /// Distinct author names, sorted.
    pub member_names: Vec<String>,
}

/// The result of parsing one chat export.
///
/// Owns the ordered record sequence plus the [`FormatCandidate`] and
/// [`DateOrder`] that were resolved for the document. The parser holds no
/// state after returning it.
#[derive(Debug, Clone)]
pub struct ChatDocument {
    records: Vec<MessageRecord>,
    format: &'static FormatCandidate,
    date_order: DateOrder,
}

impl ChatDocument {
    pub(crate) fn new(
        records: Vec<MessageRecord>,
        format: &'static FormatCandidate,
        date_order: DateOrder,
    ) -> Self {
        Self {
            records,
            format,
            date_order,
        }
    }

    /// Returns the parsed records in source order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Consumes the document, returning the records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }

    /// Returns the format candidate that won detection for this document.
    pub fn format(&self) -> &'static FormatCandidate {
        self.format
    }

    /// Returns the day/month order that was inferred for this document.
    ///
    /// Useful for auditing when the sample carried no disambiguating
    /// evidence and the configured fallback applied.
    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the document holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Computes summary metadata over the records.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatwrap::ChatParser;
    ///
    /// let doc = ChatParser::new()
    ///     .parse("15/01/2024, 10:30 - Alice: Hi\n15/01/2024, 10:31 - Bob: Hello")?;
    /// let meta = doc.metadata();
    /// assert_eq!(meta.total_members, 2);
    /// assert_eq!(meta.member_names, vec!["Alice", "Bob"]);
    /// # Ok::<(), chatwrap::ChatwrapError>(())
    /// ```
    pub fn metadata(&self) -> ChatMetadata {
        let members: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(MessageRecord::author)
            .collect();

        ChatMetadata {
            total_messages: self.records.len(),
            total_members: members.len(),
            date_range_start: self.records.iter().map(MessageRecord::timestamp).min(),
            date_range_end: self.records.iter().map(MessageRecord::timestamp).max(),
            member_names: members.into_iter().map(String::from).collect(),
        }
    }
}

impl IntoIterator for ChatDocument {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
