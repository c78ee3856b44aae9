//! Similarity ranker
//!
//! Scores every fragment of a working set against the query vector and keeps
//! the best `k`. This is a linear scan with no early exit; it stands in for a
//! vector index at the working-set sizes the crate targets.

use insightx_core::{cosine, FragmentRecord, ScoredFragment, Vector};

/// Ranks fragments by cosine similarity to a query
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    top_k: usize,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOP_K)
    }
}

impl SimilarityRanker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank with the configured `k`
    pub fn rank(&self, query: &Vector, fragments: &[FragmentRecord]) -> Vec<ScoredFragment> {
        self.rank_top(query, fragments, self.top_k)
    }

    /// Score all fragments and return the best `k`, highest first.
    ///
    /// Equal scores keep their working-set order.
    pub fn rank_top(
        &self,
        query: &Vector,
        fragments: &[FragmentRecord],
        k: usize,
    ) -> Vec<ScoredFragment> {
        let mut scored: Vec<ScoredFragment> = fragments
            .iter()
            .map(|f| ScoredFragment {
                document_id: f.document_id.clone(),
                content: f.content.clone(),
                score: cosine(query.as_slice(), f.embedding.as_slice()),
            })
            .collect();

        // Vec::sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(content: &str, v: &[f32]) -> FragmentRecord {
        FragmentRecord::new(content, Vector::from_slice(v))
    }

    #[test]
    fn test_ranks_descending() {
        let fragments = vec![
            fragment("orthogonal", &[0.0, 1.0]),
            fragment("same", &[2.0, 0.0]),
            fragment("close", &[1.0, 0.2]),
            fragment("opposite", &[-1.0, 0.0]),
        ];
        let ranked = SimilarityRanker::new(10).rank(&Vector::new(vec![1.0, 0.0]), &fragments);

        let order: Vec<&str> = ranked.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["same", "close", "orthogonal", "opposite"]);
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
        assert!((ranked[3].score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_is_min_k_and_count() {
        let fragments: Vec<FragmentRecord> = (0..5)
            .map(|i| fragment(&format!("f{}", i), &[i as f32, 1.0]))
            .collect();
        let query = Vector::new(vec![1.0, 1.0]);
        let ranker = SimilarityRanker::default();

        assert_eq!(ranker.rank_top(&query, &fragments, 3).len(), 3);
        assert_eq!(ranker.rank_top(&query, &fragments, 8).len(), 5);
        assert!(ranker.rank_top(&query, &[], 8).is_empty());
    }

    #[test]
    fn test_sorted_non_increasing() {
        let fragments: Vec<FragmentRecord> = (0..50)
            .map(|i| {
                let x = (i as f32 * 0.37).sin();
                let y = (i as f32 * 1.13).cos();
                fragment(&format!("f{}", i), &[x, y, 0.5])
            })
            .collect();
        let ranked = SimilarityRanker::new(50).rank(&Vector::new(vec![0.3, -0.7, 0.2]), &fragments);
        assert_eq!(ranked.len(), 50);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_retrieval_order() {
        let fragments = vec![
            fragment("first", &[1.0, 0.0]),
            fragment("second", &[3.0, 0.0]),
            fragment("third", &[0.5, 0.0]),
        ];
        let ranked = SimilarityRanker::new(3).rank(&Vector::new(vec![1.0, 0.0]), &fragments);
        let order: Vec<&str> = ranked.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_degenerate_vectors_score_zero() {
        let fragments = vec![fragment("zero", &[0.0, 0.0]), fragment("one", &[1.0, 0.0])];
        let ranked = SimilarityRanker::new(2).rank(&Vector::new(vec![1.0, 0.0]), &fragments);
        assert_eq!(ranked[1].content, "zero");
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_overflowing_embedding_does_not_break_order() {
        // 1e39 does not fit in an f32 and decodes as infinity
        let overflow: Vec<f32> = serde_json::from_str("[1e39, 0.0]").unwrap();
        let fragments = vec![
            fragment("low", &[0.2, 1.0]),
            FragmentRecord::new("overflow", Vector::new(overflow)),
            fragment("high", &[1.0, 0.1]),
        ];
        let ranked = SimilarityRanker::new(3).rank(&Vector::new(vec![1.0, 0.0]), &fragments);

        assert!(ranked.iter().all(|r| r.score.is_finite()));
        let order: Vec<&str> = ranked.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["high", "low", "overflow"]);
        assert!(ranked[0].score > 0.99);

        let top = SimilarityRanker::new(1).rank(&Vector::new(vec![1.0, 0.0]), &fragments);
        assert_eq!(top[0].content, "high");
    }

    #[test]
    fn test_keeps_document_id() {
        let fragments = vec![fragment("a", &[1.0]).with_document("doc-7")];
        let ranked = SimilarityRanker::new(1).rank(&Vector::new(vec![1.0]), &fragments);
        assert_eq!(ranked[0].document_id.as_deref(), Some("doc-7"));
    }
}
