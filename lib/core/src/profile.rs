//! Dataset profile records
//!
//! The immutable output of profiling one tabular source: one [`ColumnProfile`]
//! per column plus the inferred target and task.

use serde::{Deserialize, Serialize};

/// Semantic type of a column.
///
/// Declaration order is the tie-break priority used when tallying sampled
/// values: numeric > datetime > categorical > text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Datetime,
    Categorical,
    Text,
}

impl ColumnType {
    /// All types in tie-break priority order
    pub const PRIORITY: [ColumnType; 4] = [
        ColumnType::Numeric,
        ColumnType::Datetime,
        ColumnType::Categorical,
        ColumnType::Text,
    ];

    /// Position in [`ColumnType::PRIORITY`]
    #[inline]
    pub fn rank(self) -> usize {
        match self {
            ColumnType::Numeric => 0,
            ColumnType::Datetime => 1,
            ColumnType::Categorical => 2,
            ColumnType::Text => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Datetime => "datetime",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-learning framing inferred from the target column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Classification,
    Regression,
    #[default]
    Unknown,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Classification => "classification",
            TaskKind::Regression => "regression",
            TaskKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a single column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ColumnType,
    /// Empty or absent cells over the whole column
    pub missing: usize,
    /// Distinct non-missing values (categorical only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
}

impl ColumnProfile {
    /// A profile carrying only the name, type and missing count
    pub fn bare(name: impl Into<String>, dtype: ColumnType, missing: usize) -> Self {
        Self {
            name: name.into(),
            dtype,
            missing,
            distinct: None,
            mean: None,
            std: None,
            min: None,
            max: None,
            p25: None,
            p50: None,
            p75: None,
        }
    }

    #[inline]
    pub fn has_numeric_summary(&self) -> bool {
        self.mean.is_some()
    }
}

/// Profile of one tabular source.
///
/// Created once per ingestion; a re-ingestion of the same `source_id`
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetProfile {
    pub source_id: String,
    pub row_count: usize,
    pub column_count: usize,
    pub inferred_task: TaskKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub columns: Vec<ColumnProfile>,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Profile of the target column, if a target was chosen
    pub fn target_column(&self) -> Option<&ColumnProfile> {
        self.target.as_deref().and_then(|t| self.column(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_matches_rank() {
        for (i, t) in ColumnType::PRIORITY.iter().enumerate() {
            assert_eq!(t.rank(), i);
        }
    }

    #[test]
    fn test_serde_lowercase_names() {
        assert_eq!(serde_json::to_string(&ColumnType::Datetime).unwrap(), "\"datetime\"");
        assert_eq!(serde_json::to_string(&TaskKind::Regression).unwrap(), "\"regression\"");
    }

    #[test]
    fn test_bare_column_omits_summary_fields() {
        let col = ColumnProfile::bare("notes", ColumnType::Text, 2);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["missing"], 2);
        assert!(json.get("mean").is_none());
        assert!(json.get("distinct").is_none());
        assert!(!col.has_numeric_summary());
    }

    #[test]
    fn test_target_column_lookup() {
        let profile = DatasetProfile {
            source_id: "doc-1".to_string(),
            row_count: 3,
            column_count: 2,
            inferred_task: TaskKind::Classification,
            target: Some("label".to_string()),
            columns: vec![
                ColumnProfile::bare("id", ColumnType::Numeric, 0),
                ColumnProfile::bare("label", ColumnType::Categorical, 0),
            ],
        };
        assert_eq!(profile.target_column().map(|c| c.dtype), Some(ColumnType::Categorical));
        assert!(profile.column("missing").is_none());
    }
}
