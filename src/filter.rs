//! Filter parsed records by date range, author, and kind.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections after parsing.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Year | [`with_year`](FilterConfig::with_year) | Records within one calendar year |
//! | Author | [`with_author`](FilterConfig::with_author) | Records from one author |
//! | Drop system | [`with_drop_system`](FilterConfig::with_drop_system) | Remove system notices |
//! | Drop author | [`with_drop_author`](FilterConfig::with_drop_author) | Remove named authors |
//! | Min messages | [`with_min_messages`](FilterConfig::with_min_messages) | Remove low-volume authors |
//!
//! # Examples
//!
//! ```
//! use chatwrap::filter::{FilterConfig, apply_filters};
//! use chatwrap::ChatParser;
//!
//! let text = "15/01/2024, 10:30 - Alice: Hello\n\
//!             15/01/2024, 10:31 - Bob: Hi there\n\
//!             16/06/2024, 09:00 - Alice: Still here";
//! let doc = ChatParser::new().parse(text)?;
//!
//! let config = FilterConfig::new()
//!     .with_author("alice")
//!     .with_date_from("2024-06-01")?;
//! let filtered = apply_filters(doc.into_records(), &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "Still here");
//! # Ok::<(), chatwrap::ChatwrapError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Author matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic
//! - `min_messages` counts surviving user messages per author after the
//!   per-record filters ran

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ChatwrapError, Result};
use crate::record::MessageRecord;

/// Configuration for filtering parsed records.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only records from this author (case-insensitive).
    pub author: Option<String>,

    /// Remove system notices.
    pub drop_system: bool,

    /// Remove records from these authors (case-insensitive).
    pub drop_authors: Vec<String>,

    /// Remove user messages from authors with fewer surviving messages than
    /// this. Zero disables the filter.
    pub min_messages: usize,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatwrapError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        self.after = Some(date.and_hms_opt(0, 0, 0).unwrap());
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatwrapError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        // End of the day to include the full day
        self.before = Some(date.and_hms_opt(23, 59, 59).unwrap());
        Ok(self)
    }

    /// Restricts to one calendar year. Overwrites any date range set before.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.after = NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.and_hms_opt(0, 0, 0).unwrap());
        self.before =
            NaiveDate::from_ymd_opt(year, 12, 31).map(|d| d.and_hms_opt(23, 59, 59).unwrap());
        self
    }

    /// Sets the author filter. Matching is case-insensitive for ASCII
    /// characters.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Removes system notices from the result.
    #[must_use]
    pub fn with_drop_system(mut self, drop: bool) -> Self {
        self.drop_system = drop;
        self
    }

    /// Removes every record from the given author. Useful for bot accounts.
    /// May be called repeatedly.
    #[must_use]
    pub fn with_drop_author(mut self, author: impl Into<String>) -> Self {
        self.drop_authors.push(author.into());
        self
    }

    /// Removes user messages from authors with fewer than `min` surviving
    /// messages.
    #[must_use]
    pub fn with_min_messages(mut self, min: usize) -> Self {
        self.min_messages = min;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some()
            || self.before.is_some()
            || self.author.is_some()
            || self.drop_system
            || !self.drop_authors.is_empty()
            || self.min_messages > 0
    }

    fn keeps(&self, record: &MessageRecord) -> bool {
        if self.drop_system && record.is_system() {
            return false;
        }

        if let Some(ref author) = self.author {
            match record.author() {
                Some(name) if name.eq_ignore_ascii_case(author) => {}
                _ => return false,
            }
        }

        if let Some(name) = record.author() {
            if self
                .drop_authors
                .iter()
                .any(|dropped| name.eq_ignore_ascii_case(dropped))
            {
                return false;
            }
        }

        let ts = record.timestamp();
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }

        true
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatwrapError::invalid_date(date_str))
}

/// Filters a collection of records based on the provided configuration.
///
/// Returns a new vector containing only records that match all active
/// filters, in their original order. If no filters are active, returns the
/// input unchanged.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    let mut kept: Vec<MessageRecord> = records
        .into_iter()
        .filter(|record| config.keeps(record))
        .collect();

    if config.min_messages > 0 {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for record in &kept {
            if let Some(author) = record.author() {
                *counts.entry(author).or_default() += 1;
            }
        }
        let low_volume: std::collections::HashSet<String> = counts
            .into_iter()
            .filter(|&(_, count)| count < config.min_messages)
            .map(|(author, _)| author.to_owned())
            .collect();
        kept.retain(|record| {
            record
                .author()
                .is_none_or(|author| !low_volume.contains(author))
        });
    }

    kept
}
