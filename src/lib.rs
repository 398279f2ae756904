//! # Chatwrap
//!
//! A Rust library for parsing plain-text chat exports into structured,
//! timestamped message records.
//!
//! ## Overview
//!
//! Exported chats are line-oriented text whose date notation varies by
//! platform version, device locale, and region: day-first or month-first
//! pairs, year-first layouts, slash/dash/dot separators, bracketed or dashed
//! headers, 12- or 24-hour clocks. Chatwrap detects the notation from a
//! bounded sample of leading lines, resolves the day/month order once per
//! document, and then turns every line into a [`MessageRecord`]:
//!
//! - multi-line messages are reassembled across continuation lines
//! - system notices (group created, member added) are kept, marked
//!   [`MessageKind::System`]
//! - malformed lines never abort parsing; they fold into the preceding
//!   message body
//!
//! ## Quick Start
//!
//! ```rust
//! use chatwrap::ChatParser;
//!
//! let text = "15/01/2024, 10:30 - Alice: Hello!\n\
//!             15/01/2024, 10:31 - Bob: Hi, this reply\n\
//!             spans two lines";
//!
//! let doc = ChatParser::new().parse(text)?;
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.records()[1].body(), "Hi, this reply\nspans two lines");
//! # Ok::<(), chatwrap::ChatwrapError>(())
//! ```
//!
//! ## Streaming for Large Exports
//!
//! [`ChatParser::records`] returns a lazy iterator; memory use stays
//! constant regardless of export size:
//!
//! ```rust
//! use chatwrap::ChatParser;
//!
//! let text = "15/01/2024, 10:30 - Alice: Hello!";
//! let parser = ChatParser::new();
//! for record in parser.records(text)? {
//!     println!("{}: {}", record.author().unwrap_or("system"), record.body());
//! }
//! # Ok::<(), chatwrap::ChatwrapError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`ChatParser`], the entry point
//! - [`config`] — [`ParseConfig`](config::ParseConfig),
//!   [`OrderFallback`](config::OrderFallback)
//! - [`format`] — the format-candidate registry and [`DateOrder`](format::DateOrder)
//! - [`detect`] — format detection and day/month order resolution
//! - [`classify`] — per-line classification
//! - [`assemble`] — multi-line message assembly, [`RecordIter`](assemble::RecordIter)
//! - [`record`] — [`MessageRecord`], [`ChatDocument`], [`ChatMetadata`](record::ChatMetadata)
//! - [`media`] — media-placeholder recognition ([`ContentKind`](media::ContentKind))
//! - [`filter`] — post-parse filtering ([`FilterConfig`](filter::FilterConfig))
//! - [`error`] — [`ChatwrapError`], [`Result`]
//! - [`prelude`] — convenient re-exports

pub mod assemble;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod format;
pub mod media;
pub mod parser;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ChatwrapError, Result};
pub use parser::ChatParser;
pub use record::{ChatDocument, MessageKind, MessageRecord};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatwrapError, Result};

    pub use crate::parser::ChatParser;

    pub use crate::config::{OrderFallback, ParseConfig};

    pub use crate::record::{ChatDocument, ChatMetadata, MessageKind, MessageRecord};

    pub use crate::format::{DateOrder, FormatCandidate};

    pub use crate::media::{ContentKind, classify_content};

    pub use crate::filter::{FilterConfig, apply_filters};
}
