//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::format::DateOrder;

/// Which interpretation of an ambiguous date pair applies when the sampled
/// lines carry no field exceeding 12.
///
/// Most exports worldwide are day-first, so that is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderFallback {
    /// Treat the first field as the day (European style).
    #[default]
    DayFirst,
    /// Treat the first field as the month (US style).
    MonthFirst,
}

impl From<OrderFallback> for DateOrder {
    fn from(fallback: OrderFallback) -> Self {
        match fallback {
            OrderFallback::DayFirst => DateOrder::DayMonth,
            OrderFallback::MonthFirst => DateOrder::MonthDay,
        }
    }
}

/// Configuration for [`ChatParser`](crate::ChatParser).
///
/// # Example
///
/// ```rust
/// use chatwrap::config::{OrderFallback, ParseConfig};
///
/// let config = ParseConfig::new()
///     .with_sample_size(128)
///     .with_order_fallback(OrderFallback::MonthFirst);
///
/// assert_eq!(config.sample_size, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// How many leading lines feed format detection and date-order
    /// resolution. Detection cost is bounded by this regardless of document
    /// size.
    pub sample_size: usize,

    /// Applied when the sample leaves the day/month order ambiguous.
    pub order_fallback: OrderFallback,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            sample_size: 64,
            order_fallback: OrderFallback::default(),
        }
    }
}

impl ParseConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the detection sample size.
    ///
    /// A size of zero makes detection fail on every document; sizes beyond
    /// the document's line count are harmless.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the fallback date order for ambiguous documents.
    #[must_use]
    pub fn with_order_fallback(mut self, fallback: OrderFallback) -> Self {
        self.order_fallback = fallback;
        self
    }
}
