//! The parsing entry point.
//!
//! [`ChatParser`] ties the pipeline together: sample the leading lines,
//! detect the format, resolve the day/month order, then classify and
//! assemble every line. The parser holds configuration only; each call is
//! independent and immutable input is never modified.

use crate::assemble::RecordIter;
use crate::config::ParseConfig;
use crate::detect::{detect, resolve_order};
use crate::error::Result;
use crate::record::ChatDocument;

/// Parses chat export text into [`MessageRecord`](crate::MessageRecord)s.
///
/// # Examples
///
/// Eager parsing into a [`ChatDocument`]:
///
/// ```rust
/// use chatwrap::ChatParser;
///
/// let text = "15/01/2024, 10:30 - Alice: Hello\n\
///             and a second line\n\
///             15/01/2024, 10:31 - Bob: Hi";
/// let doc = ChatParser::new().parse(text)?;
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.records()[0].body(), "Hello\nand a second line");
/// # Ok::<(), chatwrap::ChatwrapError>(())
/// ```
///
/// Lazy iteration for large exports:
///
/// ```rust
/// use chatwrap::ChatParser;
///
/// let text = "15/01/2024, 10:30 - Alice: Hello";
/// let parser = ChatParser::new();
/// let mut records = parser.records(text)?;
///
/// assert_eq!(records.next().unwrap().author(), Some("Alice"));
/// # Ok::<(), chatwrap::ChatwrapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParseConfig,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatwrap::ChatParser;
    /// use chatwrap::config::{OrderFallback, ParseConfig};
    ///
    /// let parser = ChatParser::with_config(
    ///     ParseConfig::new().with_order_fallback(OrderFallback::MonthFirst),
    /// );
    /// # let _ = parser;
    /// ```
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Detects the format and returns a lazy record iterator over `text`.
    ///
    /// Detection reads at most `sample_size` leading lines; iteration then
    /// proceeds line by line without further allocation beyond the records
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ChatwrapError::UnrecognizedFormat`] when no registered
    /// candidate matches any sampled line.
    ///
    /// [`ChatwrapError::UnrecognizedFormat`]: crate::ChatwrapError::UnrecognizedFormat
    pub fn records<'a>(&self, text: &'a str) -> Result<RecordIter<'a>> {
        let sample: Vec<&str> = text.lines().take(self.config.sample_size).collect();
        let candidate = detect(&sample)?;
        let order = resolve_order(&sample, candidate, self.config.order_fallback);
        Ok(RecordIter::new(text, candidate, order))
    }

    /// Parses the whole export eagerly into a [`ChatDocument`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatwrapError::UnrecognizedFormat`] when no registered
    /// candidate matches any sampled line.
    ///
    /// [`ChatwrapError::UnrecognizedFormat`]: crate::ChatwrapError::UnrecognizedFormat
    pub fn parse(&self, text: &str) -> Result<ChatDocument> {
        let iter = self.records(text)?;
        let format = iter.format();
        let order = iter.date_order();
        Ok(ChatDocument::new(iter.collect(), format, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrderFallback;
    use crate::format::DateOrder;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_basic_export() {
        let text = "15/01/2024, 10:30 - Alice: Hello\n\
                    15/01/2024, 10:31 - Bob: Hi\n\
                    15/01/2024, 10:32 - Alice: Multi\nline body";
        let doc = ChatParser::new().parse(text).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.records()[2].body(), "Multi\nline body");
        assert_eq!(doc.date_order(), DateOrder::DayMonth);
    }

    #[test]
    fn test_parse_bracketed_ios_export() {
        let text = "[23/10/21, 18:44:02] Iago: hey\n\
                    [23/10/21, 18:45:00] Maria: hi";
        let doc = ChatParser::new().parse(text).unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.format().is_bracketed());
        assert_eq!(doc.records()[0].timestamp().second(), 2);
    }

    #[test]
    fn test_parse_unrecognized_input() {
        let err = ChatParser::new().parse("nothing resembling a chat").unwrap_err();
        assert!(err.is_unrecognized_format());
    }

    #[test]
    fn test_parse_empty_input() {
        let err = ChatParser::new().parse("").unwrap_err();
        assert!(err.is_unrecognized_format());
    }

    #[test]
    fn test_order_fallback_applies() {
        // All fields <= 12, so the sample is ambiguous.
        let text = "03/04/2024, 10:30 - Alice: hi";

        let day_first = ChatParser::new().parse(text).unwrap();
        assert_eq!(day_first.records()[0].timestamp().day(), 3);

        let month_first = ChatParser::with_config(
            ParseConfig::new().with_order_fallback(OrderFallback::MonthFirst),
        )
        .parse(text)
        .unwrap();
        assert_eq!(month_first.records()[0].timestamp().day(), 4);
        assert_eq!(month_first.records()[0].timestamp().month(), 3);
    }

    #[test]
    fn test_order_evidence_beats_fallback() {
        let text = "03/04/2024, 10:30 - Alice: ambiguous\n\
                    15/06/2024, 10:31 - Bob: day evidence";
        let doc = ChatParser::with_config(
            ParseConfig::new().with_order_fallback(OrderFallback::MonthFirst),
        )
        .parse(text)
        .unwrap();
        assert_eq!(doc.date_order(), DateOrder::DayMonth);
        assert_eq!(doc.records()[0].timestamp().day(), 3);
    }

    #[test]
    fn test_sample_size_bounds_detection() {
        // The only recognizable line sits beyond the one-line sample.
        let text = "preamble with no timestamp\n15/01/2024, 10:30 - Alice: hi";
        let parser = ChatParser::with_config(ParseConfig::new().with_sample_size(1));
        assert!(parser.parse(text).is_err());

        let parser = ChatParser::with_config(ParseConfig::new().with_sample_size(2));
        assert_eq!(parser.parse(text).unwrap().len(), 1);
    }

    #[test]
    fn test_records_iterator_matches_parse() {
        let text = "15/01/2024, 10:30 - Alice: a\n15/01/2024, 10:31 - Bob: b";
        let parser = ChatParser::new();
        let lazy: Vec<_> = parser.records(text).unwrap().collect();
        let eager = parser.parse(text).unwrap();
        assert_eq!(lazy, eager.into_records());
    }

    #[test]
    fn test_parse_mixed_system_and_user() {
        let text = "06/03/2017, 00:45 - Messages to this group are now secured with end-to-end encryption.\n\
                    06/03/2017, 00:45 - You created group \"Test\"\n\
                    06/03/2017, 00:46 - Alice: first real message";
        let doc = ChatParser::new().parse(text).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.records()[0].is_system());
        assert!(doc.records()[1].is_system());
        assert_eq!(doc.records()[2].author(), Some("Alice"));
    }
}
