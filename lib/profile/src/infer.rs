//! Column type inference
//!
//! Each sampled value is classified on its own (numeric, then datetime, then
//! categorical by length, else text) and the column takes the most frequent
//! class. Ties resolve by [`ColumnType::PRIORITY`].

use crate::config::ProfilerConfig;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use insightx_core::ColumnType;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%b %d %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

/// Parse a finite number. `inf`, `NaN` and friends are rejected.
#[inline]
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether `value` reads as a date or timestamp in one of the accepted layouts
pub fn is_datetime(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok() {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|f| NaiveDateTime::parse_from_str(value, f).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(value, f).is_ok())
}

/// Classify a single non-missing value
pub fn classify_value(value: &str, categorical_max_len: usize) -> ColumnType {
    if parse_number(value).is_some() {
        ColumnType::Numeric
    } else if is_datetime(value) {
        ColumnType::Datetime
    } else if value.chars().count() <= categorical_max_len {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    }
}

/// Per-type counts over a column sample, indexed by [`ColumnType::rank`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTally {
    counts: [usize; 4],
}

impl TypeTally {
    #[inline]
    pub fn add(&mut self, dtype: ColumnType) {
        self.counts[dtype.rank()] += 1;
    }

    #[inline]
    pub fn count(&self, dtype: ColumnType) -> usize {
        self.counts[dtype.rank()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Highest count wins; on equal counts the earlier type in priority order wins.
    /// An empty tally resolves to `Numeric`.
    pub fn winner(&self) -> ColumnType {
        let mut best = ColumnType::PRIORITY[0];
        for dtype in ColumnType::PRIORITY {
            if self.count(dtype) > self.count(best) {
                best = dtype;
            }
        }
        best
    }
}

/// Tally the first `sample_cap` non-missing values of a column
pub fn tally_column(values: &[Option<String>], config: &ProfilerConfig) -> TypeTally {
    let mut tally = TypeTally::default();
    for value in values.iter().flatten().take(config.sample_cap) {
        tally.add(classify_value(value, config.categorical_max_len));
    }
    tally
}

/// Infer the semantic type of a column
pub fn infer_type(values: &[Option<String>], config: &ProfilerConfig) -> ColumnType {
    tally_column(values, config).winner()
}
