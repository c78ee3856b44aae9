//! Context-sufficiency router
//!
//! A single threshold on the best score decides between answering from
//! retrieved fragments (grounded) and answering from general knowledge.
//! Raising the threshold trades recall for precision; it is the only knob.

use insightx_core::ScoredFragment;
use serde::{Deserialize, Serialize};

/// Reported as the top score when nothing was retrieved
pub const NO_MATCH_SCORE: f32 = -1.0;

/// Which prompting strategy the downstream generation step should use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Answer from the retrieved context, admitting when it is insufficient
    Grounded,
    /// Answer from general knowledge, without claims about the user's files
    General,
    /// Answer only from the retrieved context, whatever its score
    Strict,
}

/// Outcome of routing one query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingDecision {
    pub use_grounded_context: bool,
    pub top_score: f32,
    /// Fragments handed to the grounded prompt, best first. Empty when the
    /// decision is not grounded.
    pub selected_fragments: Vec<ScoredFragment>,
}

impl RoutingDecision {
    pub fn strategy(&self) -> Strategy {
        if self.use_grounded_context {
            Strategy::Grounded
        } else {
            Strategy::General
        }
    }

    /// Serialized context block: `[#rank score=x.xxx]\n<content>` entries
    /// joined by blank lines, in descending score order.
    pub fn context_block(&self) -> String {
        format_context(&self.selected_fragments)
    }
}

/// Format fragments as a rank- and score-annotated context block
pub fn format_context(fragments: &[ScoredFragment]) -> String {
    fragments
        .iter()
        .enumerate()
        .map(|(i, f)| format!("[#{} score={:.3}]\n{}", i + 1, f.score, f.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Threshold router
#[derive(Debug, Clone, Copy)]
pub struct ContextRouter {
    threshold: f32,
}

impl Default for ContextRouter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_THRESHOLD)
    }
}

impl ContextRouter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Decide from a ranked (best-first) list.
    ///
    /// Grounded iff the list is non-empty and its first score reaches the
    /// threshold. A grounded decision keeps the whole ranked list.
    pub fn decide(&self, ranked: Vec<ScoredFragment>) -> RoutingDecision {
        let top_score = ranked.first().map(|f| f.score).unwrap_or(NO_MATCH_SCORE);
        let use_grounded_context = !ranked.is_empty() && top_score >= self.threshold;

        tracing::debug!(
            "Routing: top_score={:.3} threshold={:.3} grounded={}",
            top_score,
            self.threshold,
            use_grounded_context
        );

        RoutingDecision {
            use_grounded_context,
            top_score,
            selected_fragments: if use_grounded_context { ranked } else { Vec::new() },
        }
    }
}
