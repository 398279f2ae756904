//! Format detection and day/month order resolution.
//!
//! Both decisions are made once per document from a bounded sample of its
//! leading lines, then threaded into every subsequent line classification.
//! Nothing here mutates shared state, so documents can be detected in
//! parallel.

use crate::config::OrderFallback;
use crate::error::{ChatwrapError, Result};
use crate::format::{DateOrder, FormatCandidate, registry};

/// Ranks every registered candidate against the sample.
///
/// Candidates are ordered by match count descending; ties break by
/// specificity descending, so year-first and otherwise-unambiguous layouts
/// win over formats that would require external disambiguation. The sort is
/// stable, which keeps the ranking deterministic for equal keys.
pub fn rank_candidates(sample: &[&str]) -> Vec<(&'static FormatCandidate, usize)> {
    let mut ranked: Vec<(&'static FormatCandidate, usize)> = registry()
        .iter()
        .map(|candidate| {
            let count = sample.iter().filter(|line| candidate.matches(line)).count();
            (candidate, count)
        })
        .collect();

    ranked.sort_by(|(a, count_a), (b, count_b)| {
        count_b
            .cmp(count_a)
            .then_with(|| b.specificity().cmp(&a.specificity()))
    });

    ranked
}

/// Picks the winning candidate for a document.
///
/// # Errors
///
/// Returns [`ChatwrapError::UnrecognizedFormat`] when no candidate matches
/// any sampled line; parsing cannot proceed.
pub fn detect(sample: &[&str]) -> Result<&'static FormatCandidate> {
    match rank_candidates(sample).first() {
        Some(&(candidate, count)) if count > 0 => Ok(candidate),
        _ => Err(ChatwrapError::unrecognized_format(registry().len())),
    }
}

/// Resolves the day/month order for a whole document.
///
/// Year-first candidates are never ambiguous. For pair layouts, the sample
/// is scanned for a field exceeding 12: a first field over 12 can only be a
/// day, a second field over 12 can only be a month's neighbor. When the
/// evidence is absent (or contradictory, which a well-formed export never
/// produces), the configured fallback applies uniformly to the document.
pub fn resolve_order(
    sample: &[&str],
    candidate: &FormatCandidate,
    fallback: OrderFallback,
) -> DateOrder {
    if candidate.is_year_first() {
        return DateOrder::YearFirst;
    }

    let mut first_over_12 = false;
    let mut second_over_12 = false;

    for line in sample {
        if let Some((d1, d2)) = candidate.ambiguous_pair(line) {
            first_over_12 |= d1 > 12;
            second_over_12 |= d2 > 12;
        }
    }

    match (first_over_12, second_over_12) {
        (true, false) => DateOrder::DayMonth,
        (false, true) => DateOrder::MonthDay,
        _ => fallback.into(),
    }
}
