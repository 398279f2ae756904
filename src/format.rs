//! The format candidate registry.
//!
//! WhatsApp exports carry no format declaration, and the timestamp notation
//! varies by locale: field order, `/`/`-`/`.` separators, comma or bare-space
//! date/time joiners, 12- or 24-hour clocks, optional seconds, bracketed
//! (iOS) versus dashed (Android) line shapes. This module enumerates every
//! notation the parser understands as an immutable [`FormatCandidate`] and
//! exposes the process-wide catalog through [`registry`].
//!
//! With optional seconds and two- or four-digit years folded into each
//! grammar, the catalog covers roughly ninety distinct strftime-style
//! notations observed in real exports.
//!
//! The registry is built once at first use and is read-only afterwards, so it
//! is safe to share across threads when parsing documents in parallel.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Unicode direction marks WhatsApp sprinkles at line starts and inside
/// bodies (LRM/RLM). Stripped before matching and from record bodies.
pub(crate) const DIRECTION_MARKS: [char; 2] = ['\u{200E}', '\u{200F}'];

/// How to interpret the two ambiguous numerals of a date once the year-first
/// case is excluded.
///
/// Resolved once per document and threaded into every subsequent timestamp
/// parse; it is never re-evaluated per line, so one chat cannot mix
/// interpretations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Day before month: `15/01/2024`.
    DayMonth,
    /// Month before day: `01/15/2024`.
    MonthDay,
    /// Four-digit year first: `2024/01/15`. Never ambiguous.
    YearFirst,
}

/// Date-field layout a candidate's grammar produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateLayout {
    /// Two 1-2 digit numerals, then a 2- or 4-digit year. Requires a
    /// document-wide [`DateOrder`] to interpret.
    PairThenYear,
    /// Four-digit year, then month, then day. Unambiguous.
    YearFirst,
}

/// Separator between date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateSep {
    Slash,
    Dash,
    Dot,
}

impl DateSep {
    fn pattern(self) -> &'static str {
        match self {
            DateSep::Slash => "/",
            DateSep::Dash => "-",
            DateSep::Dot => r"\.",
        }
    }

    fn glyph(self) -> char {
        match self {
            DateSep::Slash => '/',
            DateSep::Dash => '-',
            DateSep::Dot => '.',
        }
    }
}

/// What joins the date to the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Joiner {
    /// `28/01/24, 15:30` — comma plus space.
    CommaSpace,
    /// `28/01/24 15:30` — single space (Brazilian and some Android builds).
    Space,
    /// `2024-01-28T15:30` — ISO 8601 `T`, no space (technical exports).
    IsoT,
}

impl Joiner {
    fn pattern(self) -> &'static str {
        match self {
            Joiner::CommaSpace => r",\s",
            Joiner::Space => r"\s",
            Joiner::IsoT => "T",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Joiner::CommaSpace => ", ",
            Joiner::Space => " ",
            Joiner::IsoT => "T",
        }
    }
}

/// Clock convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clock {
    TwentyFourHour,
    /// Requires a meridiem marker: `AM`, `p.m.`, `P. M.`, any case, with a
    /// regular or narrow no-break space before it.
    TwelveHour,
}

/// An immutable descriptor for one recognized line grammar.
///
/// Each candidate pairs a compiled matcher with the field layout it
/// produces and a specificity rank used for tie-breaking during detection.
/// Candidates are created once at process start (see [`registry`]) and never
/// mutated.
pub struct FormatCandidate {
    layout: DateLayout,
    sep: DateSep,
    joiner: Joiner,
    clock: Clock,
    bracketed: bool,
    specificity: u8,
    regex: Regex,
}

impl FormatCandidate {
    fn new(layout: DateLayout, sep: DateSep, joiner: Joiner, clock: Clock, bracketed: bool) -> Self {
        // Year-first layouts carry zero day/month ambiguity, so they outrank
        // pair layouts on equal match counts. Brackets, the ISO joiner and an
        // explicit meridiem each make a grammar harder to match by accident.
        let mut specificity = 0;
        if layout == DateLayout::YearFirst {
            specificity += 8;
        }
        if joiner == Joiner::IsoT {
            specificity += 4;
        }
        if bracketed {
            specificity += 2;
        }
        if clock == Clock::TwelveHour {
            specificity += 1;
        }

        let pattern = build_pattern(layout, sep, joiner, clock, bracketed);
        let regex = Regex::new(&pattern).expect("generated candidate grammar must compile");

        Self {
            layout,
            sep,
            joiner,
            clock,
            bracketed,
            specificity,
            regex,
        }
    }

    /// Returns `true` if the line satisfies this candidate's grammar.
    ///
    /// Leading direction marks are ignored.
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line.trim_start_matches(DIRECTION_MARKS))
    }

    /// Captures the timestamp fields and message remainder of a line.
    ///
    /// The caller must strip leading direction marks first; see
    /// [`matches`](Self::matches) for a mark-tolerant check.
    pub(crate) fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }

    /// Returns `true` if this candidate's date layout is year-first.
    pub fn is_year_first(&self) -> bool {
        self.layout == DateLayout::YearFirst
    }

    /// Returns `true` for the bracketed (iOS-style) line shape.
    pub fn is_bracketed(&self) -> bool {
        self.bracketed
    }

    /// Returns `true` if this candidate expects a meridiem marker.
    pub fn is_twelve_hour(&self) -> bool {
        self.clock == Clock::TwelveHour
    }

    /// Tie-breaking rank: higher means preferred on equal match counts.
    pub fn specificity(&self) -> u8 {
        self.specificity
    }

    pub(crate) fn layout(&self) -> DateLayout {
        self.layout
    }

    pub(crate) fn clock(&self) -> Clock {
        self.clock
    }

    /// Extracts the two ambiguous date numerals from a line, if the line
    /// matches this candidate's grammar and the layout needs resolving.
    pub(crate) fn ambiguous_pair(&self, line: &str) -> Option<(u32, u32)> {
        if self.layout != DateLayout::PairThenYear {
            return None;
        }
        let caps = self.captures(line.trim_start_matches(DIRECTION_MARKS))?;
        let d1 = caps.name("d1")?.as_str().parse().ok()?;
        let d2 = caps.name("d2")?.as_str().parse().ok()?;
        Some((d1, d2))
    }

    /// Renders a synthetic line in this candidate's grammar.
    ///
    /// Pair layouts render day-first; interpret the result with
    /// [`DateOrder::DayMonth`]. Useful for tests and benchmarks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatwrap::format::registry;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    ///     .and_hms_opt(10, 30, 0).unwrap();
    /// let line = registry()[0].sample_line(ts, "Alice", "Hello");
    /// assert!(line.contains("Alice: Hello"));
    /// ```
    pub fn sample_line(
        &self,
        ts: chrono::NaiveDateTime,
        author: &str,
        body: &str,
    ) -> String {
        use chrono::{Datelike, Timelike};

        let s = self.sep.glyph();
        let (year, month, day) = (ts.year(), ts.month(), ts.day());
        let date = match self.layout {
            DateLayout::PairThenYear => format!("{day:02}{s}{month:02}{s}{year}"),
            DateLayout::YearFirst => format!("{year}{s}{month:02}{s}{day:02}"),
        };

        let time = match self.clock {
            Clock::TwentyFourHour => {
                format!("{:02}:{:02}:{:02}", ts.hour(), ts.minute(), ts.second())
            }
            Clock::TwelveHour => {
                let (is_pm, hour12) = ts.hour12();
                let mer = if is_pm { "PM" } else { "AM" };
                format!("{hour12}:{:02}:{:02} {mer}", ts.minute(), ts.second())
            }
        };

        let stamp = format!("{date}{}{time}", self.joiner.glyph());
        if self.bracketed {
            format!("[{stamp}] {author}: {body}")
        } else {
            format!("{stamp} - {author}: {body}")
        }
    }
}

impl fmt::Debug for FormatCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatCandidate")
            .field("layout", &self.layout)
            .field("sep", &self.sep)
            .field("joiner", &self.joiner)
            .field("clock", &self.clock)
            .field("bracketed", &self.bracketed)
            .field("specificity", &self.specificity)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FormatCandidate {
    /// A compact human-readable summary, e.g. `[D/M/Y, HH:MM AM]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.sep.glyph();
        let date = match self.layout {
            DateLayout::PairThenYear => format!("D{s}M{s}Y"),
            DateLayout::YearFirst => format!("YYYY{s}M{s}D"),
        };
        let time = match self.clock {
            Clock::TwentyFourHour => "HH:MM",
            Clock::TwelveHour => "HH:MM AM",
        };
        let stamp = format!("{date}{}{time}", self.joiner.glyph());
        if self.bracketed {
            write!(f, "[{stamp}]")
        } else {
            write!(f, "{stamp} -")
        }
    }
}

/// Builds the anchored matcher for one grammar.
///
/// Named groups: `d1`/`d2`/`d3` (date fields in source order), `h`/`m`,
/// optional `s`, `mer` for twelve-hour grammars, `rest` for everything after
/// the timestamp. Dot time separators are accepted alongside colons; the
/// captures normalize them away before numeric extraction.
fn build_pattern(
    layout: DateLayout,
    sep: DateSep,
    joiner: Joiner,
    clock: Clock,
    bracketed: bool,
) -> String {
    let s = sep.pattern();
    let date = match layout {
        DateLayout::PairThenYear => {
            format!(r"(?P<d1>\d{{1,2}}){s}(?P<d2>\d{{1,2}}){s}(?P<d3>\d{{2,4}})")
        }
        DateLayout::YearFirst => {
            format!(r"(?P<d1>\d{{4}}){s}(?P<d2>\d{{1,2}}){s}(?P<d3>\d{{1,2}})")
        }
    };

    let time = r"(?P<h>\d{1,2})[:.](?P<m>\d{2})(?:[:.](?P<s>\d{2}))?";
    let meridiem = match clock {
        Clock::TwentyFourHour => String::new(),
        // Regular or narrow no-break space, then AM/PM with optional dots.
        Clock::TwelveHour => format!(r"[\s{nnbsp}]?(?P<mer>[AaPp]\.?\s?[Mm]\.?)", nnbsp = '\u{202F}'),
    };

    let join = joiner.pattern();
    if bracketed {
        format!(r"^\[{date}{join}{time}{meridiem}\]\s(?P<rest>.*)$")
    } else {
        format!(r"^{date}{join}{time}{meridiem}\s-\s(?P<rest>.*)$")
    }
}

/// Returns the process-wide, read-only candidate catalog.
///
/// Built once on first call; subsequent calls return the same slice.
pub fn registry() -> &'static [FormatCandidate] {
    static REGISTRY: OnceLock<Vec<FormatCandidate>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> Vec<FormatCandidate> {
    let mut catalog = Vec::new();

    for bracketed in [false, true] {
        for layout in [DateLayout::PairThenYear, DateLayout::YearFirst] {
            for sep in [DateSep::Slash, DateSep::Dash, DateSep::Dot] {
                for joiner in [Joiner::CommaSpace, Joiner::Space] {
                    for clock in [Clock::TwentyFourHour, Clock::TwelveHour] {
                        catalog.push(FormatCandidate::new(layout, sep, joiner, clock, bracketed));
                    }
                }
            }
        }
    }

    // ISO 8601 with T joiner only occurs dashed, year-first, 24-hour, plain.
    catalog.push(FormatCandidate::new(
        DateLayout::YearFirst,
        DateSep::Dash,
        Joiner::IsoT,
        Clock::TwentyFourHour,
        false,
    ));

    catalog
}
