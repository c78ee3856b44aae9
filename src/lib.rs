//! # InsightX
//!
//! Tabular data profiling and semantic context routing for retrieval-augmented chat.
//!
//! InsightX turns uploaded tables into compact statistical profiles and decides,
//! for every question, whether the user's own documents hold enough relevant
//! context to ground the answer.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install insightx
//! insightx --http-port 6333 --threshold 0.30
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use insightx::prelude::*;
//!
//! let manager = StorageManager::new("./data").unwrap();
//!
//! // Profile a CSV upload
//! let profile = manager
//!     .ingest_csv("churn.csv", "tenure,plan,churned\n12,basic,yes\n40,pro,no\n")
//!     .unwrap();
//! assert_eq!(profile.target.as_deref(), Some("churned"));
//!
//! // Store pre-embedded fragments and route a query embedding
//! manager
//!     .append_fragments(vec![FragmentRecord::new("Churn is highest on the basic plan", Vector::new(vec![0.9, 0.1]))])
//!     .unwrap();
//! let decision = manager.route_query(&Vector::new(vec![1.0, 0.0]), None).unwrap();
//! println!("{:?}: {}", decision.strategy(), decision.context_block());
//! ```
//!
//! ## Crate Structure
//!
//! - [`insightx-core`](https://docs.rs/insightx-core) - Data model, cosine similarity, store and embedder traits
//! - [`insightx-profile`](https://docs.rs/insightx-profile) - Type inference, column statistics, task inference
//! - [`insightx-retrieval`](https://docs.rs/insightx-retrieval) - Similarity ranking, context routing, prompt plans
//! - [`insightx-storage`](https://docs.rs/insightx-storage) - LMDB and in-memory stores
//! - [`insightx-api`](https://docs.rs/insightx-api) - REST API

// Re-export core types
pub use insightx_core::{
    ColumnProfile, ColumnType, DatasetProfile, TaskKind,
    FragmentRecord, ScoredFragment, Vector,
    Embedder, FragmentStore, ProfileStore,
    Error, Result,
};

// Re-export profiling
pub use insightx_profile::{DatasetProfiler, ProfilerConfig, RawTable};

// Re-export retrieval
pub use insightx_retrieval::{
    ChatMessage, ChatRole, ContextRouter, PromptPlan, RetrievalConfig, Retriever,
    RoutingDecision, SimilarityRanker, Strategy,
};

// Re-export storage
pub use insightx_storage::{LmdbStorage, MemoryStore, StorageManager};

// Re-export API
pub use insightx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ColumnProfile, ColumnType, DatasetProfile, TaskKind,
        FragmentRecord, ScoredFragment, Vector,
        Embedder, FragmentStore, ProfileStore,
        Error, Result,
        DatasetProfiler, ProfilerConfig, RawTable,
        ChatMessage, ContextRouter, PromptPlan, RetrievalConfig, Retriever,
        RoutingDecision, SimilarityRanker, Strategy,
        MemoryStore, StorageManager,
        RestApi,
    };
}
