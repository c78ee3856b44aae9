//! # InsightX Retrieval
//!
//! Semantic retrieval router.
//!
//! Scores stored fragments against a query embedding, keeps the best `k`,
//! and decides whether the answer should be grounded in those fragments or
//! fall back to general conversation.
//!
//! ## Example
//!
//! ```rust
//! use insightx_retrieval::{ContextRouter, SimilarityRanker, Strategy};
//! use insightx_core::{FragmentRecord, Vector};
//!
//! let fragments = vec![
//!     FragmentRecord::new("Q3 revenue grew 12%", Vector::new(vec![0.9, 0.1])),
//!     FragmentRecord::new("The office cat is named Miso", Vector::new(vec![0.0, 1.0])),
//! ];
//!
//! let ranked = SimilarityRanker::new(8).rank(&Vector::new(vec![1.0, 0.0]), &fragments);
//! let decision = ContextRouter::new(0.30).decide(ranked);
//!
//! assert_eq!(decision.strategy(), Strategy::Grounded);
//! assert!(decision.context_block().starts_with("[#1 score="));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Embedder   │────>│   Ranker    │────>│   Router    │
//! │ (query→v)   │     │ (cosine)    │     │ (threshold) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            ▲                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Fragment   │     │   Prompt    │
//!                     │ working set │     │    plan     │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod ranker;
pub mod router;
pub mod prompt;
pub mod retriever;

pub use config::RetrievalConfig;
pub use ranker::SimilarityRanker;
pub use router::{format_context, ContextRouter, RoutingDecision, Strategy, NO_MATCH_SCORE};
pub use prompt::{latest_question, ChatMessage, ChatRole, PromptPlan};
pub use retriever::Retriever;
