//! Column statistics
//!
//! Descriptive summaries computed over the full column (not the inference
//! sample). Nothing here fails: values that do not parse are left out of the
//! numeric aggregates, never coerced to zero.

use crate::infer::parse_number;
use ahash::AHashSet;
use insightx_core::{ColumnProfile, ColumnType};

/// Minimum number of valid values before quantiles are reported
pub const MIN_QUANTILE_VALUES: usize = 3;

/// Numeric summary of a non-empty sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub quartiles: Option<[f64; 3]>,
}

/// Count of missing cells
#[inline]
pub fn missing_count(values: &[Option<String>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}

/// Finite numeric values of a column, in column order
pub fn numeric_values(values: &[Option<String>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .filter_map(|v| parse_number(v))
        .collect()
}

/// Quantile of an ascending-sorted, non-empty slice.
///
/// With `idx = n * p`: a fractional index takes `sorted[ceil(idx) - 1]`; an
/// integral index takes the mean of `sorted[idx - 1]` and `sorted[idx]` when
/// `n` is even, otherwise `sorted[idx]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    debug_assert!(n > 0);
    let idx = n as f64 * p;
    if p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }
    if idx.fract() != 0.0 {
        sorted[(idx.ceil() as usize).saturating_sub(1)]
    } else {
        let i = idx as usize;
        if n % 2 == 0 {
            (sorted[i - 1] + sorted[i]) / 2.0
        } else {
            sorted[i]
        }
    }
}

/// Magnitude above which values are rescaled before the running moments
const RESCALE_ABOVE: f64 = 1e150;

/// Population mean and standard deviation, finite for any finite input.
///
/// Uses Welford's running update. Columns with huge magnitudes are divided by
/// a power of two first (exact), so neither the deltas nor the squared
/// deviations overflow.
fn mean_and_std(nums: &[f64]) -> (f64, f64) {
    let max_abs = nums.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    let scale = if max_abs > RESCALE_ABOVE {
        2f64.powi(max_abs.log2().floor() as i32)
    } else {
        1.0
    };

    let (mut mean, mut m2) = (0.0f64, 0.0f64);
    for (i, &x) in nums.iter().enumerate() {
        let x = x / scale;
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let std = if nums.len() > 1 { (m2 / nums.len() as f64).sqrt() } else { 0.0 };
    (mean * scale, std * scale)
}

/// Summarize a set of finite numbers; `None` for an empty set
pub fn summarize(nums: &[f64]) -> Option<NumericSummary> {
    if nums.is_empty() {
        return None;
    }
    let count = nums.len();
    let (mean, std) = mean_and_std(nums);

    let mut sorted = nums.to_vec();
    sorted.sort_by(f64::total_cmp);
    let min = sorted[0];
    let max = sorted[count - 1];

    let quartiles = (count >= MIN_QUANTILE_VALUES).then(|| {
        [
            quantile_sorted(&sorted, 0.25),
            quantile_sorted(&sorted, 0.5),
            quantile_sorted(&sorted, 0.75),
        ]
    });

    Some(NumericSummary { count, mean, std, min, max, quartiles })
}

/// Number of distinct non-missing raw values
pub fn distinct_count(values: &[Option<String>]) -> usize {
    values
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<AHashSet<&str>>()
        .len()
}

/// Build the profile of one column given its inferred type
pub fn column_profile(name: &str, dtype: ColumnType, values: &[Option<String>]) -> ColumnProfile {
    let mut profile = ColumnProfile::bare(name, dtype, missing_count(values));

    match dtype {
        ColumnType::Numeric => {
            if let Some(summary) = summarize(&numeric_values(values)) {
                profile.mean = Some(summary.mean);
                profile.std = Some(summary.std);
                profile.min = Some(summary.min);
                profile.max = Some(summary.max);
                if let Some([p25, p50, p75]) = summary.quartiles {
                    profile.p25 = Some(p25);
                    profile.p50 = Some(p50);
                    profile.p75 = Some(p75);
                }
            }
        }
        ColumnType::Categorical => {
            profile.distinct = Some(distinct_count(values));
        }
        ColumnType::Datetime | ColumnType::Text => {}
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    #[test]
    fn test_numeric_profile() {
        let values = column(&["1", "2", "3", "4", ""]);
        let p = column_profile("x", ColumnType::Numeric, &values);
        assert_eq!(p.missing, 1);
        assert_eq!(p.mean, Some(2.5));
        assert_eq!(p.min, Some(1.0));
        assert_eq!(p.max, Some(4.0));
        assert!((p.std.unwrap() - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(p.p25, Some(1.5));
        assert_eq!(p.p50, Some(2.5));
        assert_eq!(p.p75, Some(3.5));
        assert!(p.distinct.is_none());
    }

    #[test]
    fn test_odd_count_quartiles() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 10.0);
        assert_eq!(quantile_sorted(&sorted, 0.5), 20.0);
        assert_eq!(quantile_sorted(&sorted, 0.75), 30.0);

        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 2.0);
        assert_eq!(quantile_sorted(&sorted, 0.5), 3.0);
        assert_eq!(quantile_sorted(&sorted, 0.75), 4.0);
    }

    #[test]
    fn test_quartiles_ordered_within_range() {
        let samples: [&[f64]; 4] = [
            &[5.0, -1.0, 3.0],
            &[9.0, 1.0, 1.0, 7.0, 2.0, 2.0],
            &[0.5, 0.25, 100.0, -50.0, 3.0, 3.0, 8.0],
            &[4.0, 4.0, 4.0, 4.0],
        ];
        for nums in samples {
            let s = summarize(nums).unwrap();
            let [p25, p50, p75] = s.quartiles.unwrap();
            assert!(s.min <= p25 && p25 <= p50 && p50 <= p75 && p75 <= s.max, "{:?}", nums);
        }
    }

    #[test]
    fn test_fewer_than_three_values_leave_quartiles_unset() {
        let p = column_profile("x", ColumnType::Numeric, &column(&["7", "9"]));
        assert_eq!(p.mean, Some(8.0));
        assert_eq!(p.std, Some(1.0));
        assert!(p.p25.is_none() && p.p50.is_none() && p.p75.is_none());
    }

    #[test]
    fn test_single_value_std_zero() {
        let p = column_profile("x", ColumnType::Numeric, &column(&["7"]));
        assert_eq!(p.std, Some(0.0));
        assert_eq!(p.min, Some(7.0));
        assert_eq!(p.max, Some(7.0));
    }

    #[test]
    fn test_malformed_values_excluded_not_zeroed() {
        let values = column(&["10", "oops", "20", "inf", "30"]);
        let p = column_profile("x", ColumnType::Numeric, &values);
        assert_eq!(p.mean, Some(20.0));
        assert_eq!(p.min, Some(10.0));
        assert_eq!(p.missing, 0);
    }

    #[test]
    fn test_numeric_without_valid_values() {
        let p = column_profile("x", ColumnType::Numeric, &column(&["", "n/a", ""]));
        assert_eq!(p.missing, 2);
        assert!(!p.has_numeric_summary());
        assert!(p.std.is_none() && p.min.is_none());
    }

    #[test]
    fn test_categorical_distinct() {
        let values = column(&["a", "b", "a", "", "c", "b"]);
        let p = column_profile("cat", ColumnType::Categorical, &values);
        assert_eq!(p.distinct, Some(3));
        assert_eq!(p.missing, 1);
        let non_missing = values.iter().flatten().count();
        assert!(p.distinct.unwrap() <= non_missing);
        assert!(p.mean.is_none());
    }

    #[test]
    fn test_datetime_and_text_only_missing() {
        let values = column(&["2024-01-01", ""]);
        let p = column_profile("when", ColumnType::Datetime, &values);
        assert_eq!(p, ColumnProfile::bare("when", ColumnType::Datetime, 1));

        let p = column_profile("notes", ColumnType::Text, &column(&["a long note"]));
        assert_eq!(p, ColumnProfile::bare("notes", ColumnType::Text, 0));
    }

    #[test]
    fn test_huge_values_keep_finite_moments() {
        let s = summarize(&[1e308, 1e308]).unwrap();
        assert_eq!(s.mean, 1e308);
        assert_eq!(s.std, 0.0);

        let s = summarize(&[1.5e308, 1.7e308, -1.6e308]).unwrap();
        assert!(s.mean.is_finite() && s.std.is_finite());
        assert!((s.mean - 1.6e308 / 3.0).abs() < 1e295);
        assert!(s.std > 1e308);
    }

    #[test]
    fn test_huge_column_profile_survives_json() {
        let p = column_profile("x", ColumnType::Numeric, &column(&["1e308", "1e308", "1.5e308"]));
        let json = serde_json::to_string(&p).unwrap();
        let back: ColumnProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(back.mean.is_some() && back.std.is_some());
    }
}
