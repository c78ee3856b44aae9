use serde::{Deserialize, Serialize};
use crate::vector::Vector;

/// A stored unit of ingested text with its embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FragmentRecord {
    /// Document the fragment was chunked from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub content: String,
    pub embedding: Vector,
}

impl FragmentRecord {
    pub fn new(content: impl Into<String>, embedding: Vector) -> Self {
        Self {
            document_id: None,
            content: content.into(),
            embedding,
        }
    }

    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }
}

/// A fragment scored against one query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub content: String,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

impl ScoredFragment {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            document_id: None,
            content: content.into(),
            score,
        }
    }
}
