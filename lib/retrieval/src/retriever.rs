//! Query pipeline
//!
//! ```text
//! question ──embed──> vector ──rank(working set)──> top-K ──route──> decision ──> prompt plan
//! ```

use crate::config::RetrievalConfig;
use crate::prompt::{latest_question, ChatMessage, PromptPlan};
use crate::ranker::SimilarityRanker;
use crate::router::{ContextRouter, RoutingDecision};
use insightx_core::{
    chunk_text, Embedder, Error, FragmentRecord, FragmentStore, Result, ScoredFragment, Vector,
    DEFAULT_CHUNK_CHARS,
};

/// Ranker + router over a fragment store
#[derive(Debug, Clone)]
pub struct Retriever {
    config: RetrievalConfig,
    ranker: SimilarityRanker,
    router: ContextRouter,
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new(RetrievalConfig::default())
    }
}

impl Retriever {
    pub fn new(config: RetrievalConfig) -> Self {
        Self {
            ranker: SimilarityRanker::new(config.top_k),
            router: ContextRouter::new(config.threshold),
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// The fragments scanned for one query: the first `working_set_cap` in storage order
    pub fn working_set(&self, store: &dyn FragmentStore) -> Result<Vec<FragmentRecord>> {
        store.read_fragments(self.config.working_set_cap)
    }

    /// Rank the working set against `query` and route on the result
    pub fn route_vector(&self, query: &Vector, store: &dyn FragmentStore) -> Result<RoutingDecision> {
        self.route_vector_top(query, self.config.top_k, store)
    }

    /// Same as [`Retriever::route_vector`] with a caller-supplied `k`
    pub fn route_vector_top(
        &self,
        query: &Vector,
        k: usize,
        store: &dyn FragmentStore,
    ) -> Result<RoutingDecision> {
        let fragments = self.working_set(store)?;
        let ranked = self.ranker.rank_top(query, &fragments, k);
        tracing::debug!("Ranked {} of {} fragments", ranked.len(), fragments.len());
        Ok(self.router.decide(ranked))
    }

    /// Embed `question` and route it
    pub fn route_text(
        &self,
        question: &str,
        embedder: &dyn Embedder,
        store: &dyn FragmentStore,
    ) -> Result<RoutingDecision> {
        let query = embedder.embed_one(question)?;
        self.route_vector(&query, store)
    }

    /// Route the latest user message of a conversation and build its prompt plan
    pub fn plan_chat(
        &self,
        messages: &[ChatMessage],
        embedder: &dyn Embedder,
        store: &dyn FragmentStore,
    ) -> Result<(RoutingDecision, PromptPlan)> {
        let question = latest_question(messages)?;
        let decision = self.route_text(question, embedder, store)?;
        let plan = PromptPlan::build(&decision, question, messages, self.config.history_window);
        Ok((decision, plan))
    }

    /// Rank the working set and plan a context-only answer, bypassing the
    /// threshold. Returns the fragments used and the plan.
    pub fn plan_strict(
        &self,
        query: &Vector,
        k: usize,
        question: &str,
        store: &dyn FragmentStore,
    ) -> Result<(Vec<ScoredFragment>, PromptPlan)> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidInput("question is required".to_string()));
        }
        let fragments = self.working_set(store)?;
        let ranked = self.ranker.rank_top(query, &fragments, k);
        tracing::debug!("Strict plan over {} of {} fragments", ranked.len(), fragments.len());
        let plan = PromptPlan::strict(&ranked, question);
        Ok((ranked, plan))
    }

    /// Embed `question` and plan a context-only answer with the configured `k`
    pub fn query_text_strict(
        &self,
        question: &str,
        embedder: &dyn Embedder,
        store: &dyn FragmentStore,
    ) -> Result<(Vec<ScoredFragment>, PromptPlan)> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput("question is required".to_string()));
        }
        let query = embedder.embed_one(question)?;
        self.plan_strict(&query, self.config.top_k, question, store)
    }

    /// Chunk `text`, embed every chunk and append the fragments.
    ///
    /// Returns the number of fragments written.
    pub fn ingest_document(
        &self,
        document_id: &str,
        text: &str,
        embedder: &dyn Embedder,
        store: &dyn FragmentStore,
    ) -> Result<usize> {
        let chunks = chunk_text(text, DEFAULT_CHUNK_CHARS);
        if chunks.is_empty() {
            return Ok(0);
        }

        let inputs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = embedder.embed(&inputs)?;
        if vectors.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "expected {} vectors from {}, got {}",
                chunks.len(),
                embedder.model_name(),
                vectors.len()
            )));
        }

        let fragments: Vec<FragmentRecord> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(content, embedding)| FragmentRecord::new(content, embedding).with_document(document_id))
            .collect();
        let written = store.append(fragments)?;
        tracing::info!("Ingested document '{}' as {} fragments", document_id, written);
        Ok(written)
    }
}
