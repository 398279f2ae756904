//! Per-line classification.
//!
//! One physical line either starts a new message, starts a system notice, or
//! continues the previous message. Classification is strict about numerals:
//! a line whose timestamp fields fail range validation (month 13, hour 25, a
//! meridiem next to hour 0) is never silently coerced — it degrades to a
//! continuation and gets absorbed by the assembler.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Captures;

use crate::format::{Clock, DateLayout, DateOrder, DIRECTION_MARKS, FormatCandidate};

/// The classification of one physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// A correctly parsed user message line.
    Message {
        timestamp: NaiveDateTime,
        author: &'a str,
        body: &'a str,
    },
    /// A line matching the timestamp grammar but without an author segment.
    SystemNotice {
        timestamp: NaiveDateTime,
        body: &'a str,
    },
    /// A line matching no registered timestamp grammar; folded into the
    /// body of the preceding message by the assembler.
    Continuation(&'a str),
}

/// Phrases that mark the pre-colon segment of a timestamped line as a
/// chat-management notice rather than an author name. Catches system lines
/// that happen to contain a colon later on, e.g.
/// `You changed the subject to: "Trip"`. English and Spanish, matching the
/// notices WhatsApp emits.
const SYSTEM_SHAPES: &[&str] = &[
    " added",
    " removed",
    " left",
    " joined",
    "created group",
    "creó el grupo",
    "añadió a",
    "eliminó a",
    " salió",
    "changed the subject",
    "cambió el asunto",
    "changed this group",
    "cambió el ícono",
    "changed their phone number",
    "end-to-end encrypted",
    "cifrados de extremo a extremo",
    "security code",
    "invite link",
    "disappearing messages",
];

/// Classifies one line under the document's resolved format and date order.
///
/// Leading direction marks are stripped before matching. The outcome borrows
/// from the input line.
///
/// # Example
///
/// ```rust
/// use chatwrap::classify::{LineOutcome, classify};
/// use chatwrap::detect::{detect, resolve_order};
/// use chatwrap::config::OrderFallback;
///
/// let sample = vec!["15/06/2024, 10:30 - Alice: Hello"];
/// let candidate = detect(&sample)?;
/// let order = resolve_order(&sample, candidate, OrderFallback::DayFirst);
///
/// match classify(sample[0], candidate, order) {
///     LineOutcome::Message { author, body, .. } => {
///         assert_eq!(author, "Alice");
///         assert_eq!(body, "Hello");
///     }
///     other => panic!("expected a message, got {other:?}"),
/// }
/// # Ok::<(), chatwrap::ChatwrapError>(())
/// ```
pub fn classify<'a>(
    line: &'a str,
    candidate: &FormatCandidate,
    order: DateOrder,
) -> LineOutcome<'a> {
    let stripped = line.trim_start_matches(DIRECTION_MARKS);

    let Some(caps) = candidate.captures(stripped) else {
        return LineOutcome::Continuation(stripped);
    };

    let Some(timestamp) = extract_timestamp(&caps, candidate, order) else {
        // Grammar matched but the numerals are out of range.
        return LineOutcome::Continuation(stripped);
    };

    let rest = caps
        .name("rest")
        .map_or("", |m| m.as_str())
        .trim_start_matches(DIRECTION_MARKS);

    match split_author(rest) {
        Some((author, body)) => LineOutcome::Message {
            timestamp,
            author,
            body,
        },
        None => LineOutcome::SystemNotice {
            timestamp,
            body: rest,
        },
    }
}

/// Splits the post-timestamp segment into author and body at the first
/// colon-space. Returns `None` for system notices: no colon-space at all, an
/// empty name, or a pre-colon segment shaped like a management notice.
fn split_author(rest: &str) -> Option<(&str, &str)> {
    let (name, body) = rest.split_once(": ")?;
    let name = name.trim();
    if name.is_empty() || is_system_shape(name) {
        return None;
    }
    Some((name, body))
}

fn is_system_shape(segment: &str) -> bool {
    SYSTEM_SHAPES
        .iter()
        .any(|shape| segment.contains(shape))
}

/// Builds the timestamp from the captured numerals, arranging date fields
/// per the resolved order and validating every range through chrono's
/// checked constructors.
fn extract_timestamp(
    caps: &Captures<'_>,
    candidate: &FormatCandidate,
    order: DateOrder,
) -> Option<NaiveDateTime> {
    let d1 = field(caps, "d1")?;
    let d2 = field(caps, "d2")?;
    let d3 = field(caps, "d3")?;

    let (year, month, day) = match (candidate.layout(), order) {
        (DateLayout::YearFirst, _) => (d1, d2, d3),
        (DateLayout::PairThenYear, DateOrder::MonthDay) => (d3, d1, d2),
        // The resolver never yields YearFirst for pair layouts.
        (DateLayout::PairThenYear, _) => (d3, d2, d1),
    };

    // Two-digit years are assumed to be in the 2000-2099 range.
    let year = if year < 100 { 2000 + year } else { year };

    let hour = field(caps, "h")?;
    let minute = field(caps, "m")?;
    let second = match caps.name("s") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let hour = match candidate.clock() {
        Clock::TwentyFourHour => hour,
        Clock::TwelveHour => to_24_hour(hour, caps.name("mer")?.as_str())?,
    };

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

fn field(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Converts a 12-hour clock reading to 24-hour form.
///
/// The marker may be `AM`, `a.m.`, `P. M.`, any case; everything but the
/// letters is discarded before comparison. Hours outside 1-12 are invalid on
/// a 12-hour clock.
fn to_24_hour(hour: u32, meridiem: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = if hour == 12 { 0 } else { hour };
    match normalize_meridiem(meridiem).as_str() {
        "AM" => Some(hour),
        "PM" => Some(hour + 12),
        _ => None,
    }
}

fn normalize_meridiem(marker: &str) -> String {
    marker
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::registry;
    use chrono::{Datelike, Timelike};

    fn candidate_for(line: &str) -> &'static FormatCandidate {
        crate::detect::detect(&[line]).expect("line must match a candidate")
    }

    #[test]
    fn test_classify_user_message() {
        let line = "15/06/2024, 10:30:45 - Alice: Hello there";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message {
                timestamp,
                author,
                body,
            } => {
                assert_eq!(timestamp.day(), 15);
                assert_eq!(timestamp.month(), 6);
                assert_eq!(timestamp.year(), 2024);
                assert_eq!(timestamp.second(), 45);
                assert_eq!(author, "Alice");
                assert_eq!(body, "Hello there");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_month_day_order() {
        let line = "12/31/23, 11:59 PM - Alice: Happy new year";
        let outcome = classify(line, candidate_for(line), DateOrder::MonthDay);
        match outcome {
            LineOutcome::Message {
                timestamp, author, ..
            } => {
                assert_eq!(timestamp.month(), 12);
                assert_eq!(timestamp.day(), 31);
                assert_eq!(timestamp.hour(), 23);
                assert_eq!(timestamp.minute(), 59);
                assert_eq!(author, "Alice");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_year_first_unicode_author() {
        let line = "2024/01/28, 15:30:00 - 田中: こんにちは";
        let outcome = classify(line, candidate_for(line), DateOrder::YearFirst);
        match outcome {
            LineOutcome::Message {
                timestamp,
                author,
                body,
            } => {
                assert_eq!(timestamp.year(), 2024);
                assert_eq!(timestamp.month(), 1);
                assert_eq!(timestamp.day(), 28);
                assert_eq!(author, "田中");
                assert_eq!(body, "こんにちは");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_system_notice() {
        let line = "06/03/2017, 00:45 - You created group \"Test\"";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        match outcome {
            LineOutcome::SystemNotice { body, .. } => {
                assert_eq!(body, "You created group \"Test\"");
            }
            other => panic!("expected SystemNotice, got {other:?}"),
        }
    }

    #[test]
    fn test_system_shape_with_colon_in_body() {
        let line = "06/03/2017, 00:45 - You changed the subject to: \"Trip\"";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        assert!(matches!(outcome, LineOutcome::SystemNotice { .. }));
    }

    #[test]
    fn test_author_containing_keyword_still_message() {
        let line = "06/03/2017, 00:45 - Alice: I added sugar to the recipe";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message { author, body, .. } => {
                assert_eq!(author, "Alice");
                assert_eq!(body, "I added sugar to the recipe");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_continuation() {
        let line = "just some trailing text";
        let candidate = registry().first().unwrap();
        let outcome = classify(line, candidate, DateOrder::DayMonth);
        assert_eq!(outcome, LineOutcome::Continuation(line));
    }

    #[test]
    fn test_out_of_range_month_is_continuation() {
        // Grammar matches, but month 31 under day-month order is invalid.
        let line = "12/31/23, 11:59 PM - Alice: Happy new year";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        assert!(matches!(outcome, LineOutcome::Continuation(_)));
    }

    #[test]
    fn test_invalid_time_is_continuation() {
        let line = "15/06/2024, 25:30 - Alice: no such hour";
        let candidate = candidate_for("15/06/2024, 10:30 - Alice: ok");
        let outcome = classify(line, candidate, DateOrder::DayMonth);
        assert!(matches!(outcome, LineOutcome::Continuation(_)));
    }

    #[test]
    fn test_direction_marks_stripped() {
        let line = "\u{200E}[23/10/21, 18:44:02] Iago: \u{200E}sticker omitted";
        let candidate = candidate_for(line);
        let outcome = classify(line, candidate, DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message {
                timestamp, author, ..
            } => {
                assert_eq!(timestamp.day(), 23);
                assert_eq!(timestamp.month(), 10);
                assert_eq!(author, "Iago");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_meridiem_variants() {
        for (marker, hour) in [
            ("AM", 1),
            ("am", 1),
            ("a.m.", 1),
            ("A.M.", 1),
            ("PM", 13),
            ("p.m.", 13),
            ("p. m.", 13),
        ] {
            let line = format!("23/06/2018, 01:55 {marker} - Luke: Hey!");
            let candidate = candidate_for("23/06/2018, 01:55 PM - Luke: Hey!");
            match classify(&line, candidate, DateOrder::DayMonth) {
                LineOutcome::Message { timestamp, .. } => {
                    assert_eq!(timestamp.hour(), hour, "marker {marker}");
                }
                other => panic!("marker {marker}: expected Message, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_twelve_hour_boundaries() {
        let candidate = candidate_for("23/06/2018, 12:00 PM - a: m");
        let noon = "23/06/2018, 12:00 PM - a: m";
        let midnight = "23/06/2018, 12:00 AM - a: m";
        match classify(noon, candidate, DateOrder::DayMonth) {
            LineOutcome::Message { timestamp, .. } => assert_eq!(timestamp.hour(), 12),
            other => panic!("expected Message, got {other:?}"),
        }
        match classify(midnight, candidate, DateOrder::DayMonth) {
            LineOutcome::Message { timestamp, .. } => assert_eq!(timestamp.hour(), 0),
            other => panic!("expected Message, got {other:?}"),
        }
        // Hour 0 does not exist on a 12-hour clock.
        let invalid = "23/06/2018, 00:30 AM - a: m";
        assert!(matches!(
            classify(invalid, candidate, DateOrder::DayMonth),
            LineOutcome::Continuation(_)
        ));
    }

    #[test]
    fn test_dot_time_separator_normalized() {
        let line = "03-06-2018, 01.55 PM - a: m";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message { timestamp, .. } => {
                assert_eq!(timestamp.hour(), 13);
                assert_eq!(timestamp.minute(), 55);
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_two_digit_year_widened() {
        let line = "3/6/18, 1:55 PM - a: m";
        let outcome = classify(line, candidate_for(line), DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message { timestamp, .. } => assert_eq!(timestamp.year(), 2018),
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_message_line() {
        let line = "03/02/17, 18:42 - Luke: ";
        let outcome = classify(line, candidate_for("03/02/17, 18:42 - Luke: x"), DateOrder::DayMonth);
        match outcome {
            LineOutcome::Message { author, body, .. } => {
                assert_eq!(author, "Luke");
                assert_eq!(body, "");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }
}
