//! Target and task inference
//!
//! Both steps are name/type heuristics, not validated inference: the target
//! is the first header matching a hint (hint order decides), else the last
//! column; the task follows from the target's dtype alone.

use insightx_core::{ColumnType, TaskKind};

/// Index of the target column, or `None` for an empty header.
pub fn select_target<S: AsRef<str>>(header: &[String], hints: &[S]) -> Option<usize> {
    for hint in hints {
        let hint = hint.as_ref().to_lowercase();
        if let Some(idx) = header.iter().position(|name| name.to_lowercase() == hint) {
            return Some(idx);
        }
    }
    header.len().checked_sub(1)
}

/// Task implied by the target column's dtype
pub fn infer_task(target_dtype: Option<ColumnType>) -> TaskKind {
    match target_dtype {
        Some(ColumnType::Numeric) => TaskKind::Regression,
        Some(ColumnType::Categorical) => TaskKind::Classification,
        Some(ColumnType::Datetime) | Some(ColumnType::Text) | None => TaskKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TARGET_HINTS;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hint_match() {
        let h = header(&["id", "age", "label"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(2));
    }

    #[test]
    fn test_case_insensitive() {
        let h = header(&["Target", "x"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(0));
    }

    #[test]
    fn test_hint_order_decides_between_matches() {
        // "label" appears first in the header but "target" is the stronger hint
        let h = header(&["label", "feature", "target"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(2));
    }

    #[test]
    fn test_no_partial_matches() {
        let h = header(&["target_price", "my_label", "year"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(2));
    }

    #[test]
    fn test_fallback_last_column_and_empty() {
        let h = header(&["a", "b", "c"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(2));
        assert_eq!(select_target(&[], &DEFAULT_TARGET_HINTS), None);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let h = header(&["y", "x", "Y"]);
        assert_eq!(select_target(&h, &DEFAULT_TARGET_HINTS), Some(0));
    }

    #[test]
    fn test_task_from_dtype() {
        assert_eq!(infer_task(Some(ColumnType::Numeric)), TaskKind::Regression);
        assert_eq!(infer_task(Some(ColumnType::Categorical)), TaskKind::Classification);
        assert_eq!(infer_task(Some(ColumnType::Datetime)), TaskKind::Unknown);
        assert_eq!(infer_task(Some(ColumnType::Text)), TaskKind::Unknown);
        assert_eq!(infer_task(None), TaskKind::Unknown);
    }
}
