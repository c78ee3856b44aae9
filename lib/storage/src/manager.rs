use crate::lmdb_storage::LmdbStorage;
use insightx_core::{
    DatasetProfile, Embedder, Error, FragmentRecord, FragmentStore, ProfileStore, Result,
    ScoredFragment, Vector,
};
use insightx_profile::{DatasetProfiler, ProfilerConfig, RawTable};
use insightx_retrieval::{ChatMessage, PromptPlan, RetrievalConfig, Retriever, RoutingDecision};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owns the persistent store and the configured profiler/retriever
pub struct StorageManager {
    data_dir: PathBuf,
    storage: Arc<LmdbStorage>,
    profiler: DatasetProfiler,
    retriever: Retriever,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_config(data_dir, ProfilerConfig::default(), RetrievalConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(
        data_dir: P,
        profiler_config: ProfilerConfig,
        retrieval_config: RetrievalConfig,
    ) -> Result<Self> {
        profiler_config.validate()?;
        retrieval_config.validate()?;

        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let lmdb_path = data_dir.join("lmdb");
        let storage = Arc::new(LmdbStorage::new(&lmdb_path)
            .map_err(|e| Error::Storage(e.to_string()))?);

        tracing::info!(
            "Opened store at {} ({} datasets, {} fragments)",
            lmdb_path.display(),
            storage.list()?.len(),
            storage.count()?
        );

        Ok(Self {
            data_dir,
            storage,
            profiler: DatasetProfiler::new(profiler_config),
            retriever: Retriever::new(retrieval_config),
        })
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[inline]
    pub fn storage(&self) -> &Arc<LmdbStorage> {
        &self.storage
    }

    #[inline]
    pub fn retrieval_config(&self) -> &RetrievalConfig {
        self.retriever.config()
    }

    // ==================== Profiles ====================

    /// Profile `table` and replace the stored profile for `source_id`
    pub fn ingest_table(&self, source_id: &str, table: &RawTable) -> Result<DatasetProfile> {
        self.profiler.profile_and_store(source_id, table, self.storage.as_ref())
    }

    pub fn ingest_csv(&self, source_id: &str, content: &str) -> Result<DatasetProfile> {
        let table = RawTable::from_csv_str(content)?;
        self.ingest_table(source_id, &table)
    }

    /// Profile a CSV upload and also index its rows as text fragments.
    ///
    /// Returns the profile and the number of fragments written. The profile
    /// is stored first; an empty table writes neither.
    pub fn ingest_csv_with_fragments(
        &self,
        source_id: &str,
        content: &str,
        embedder: &dyn Embedder,
    ) -> Result<(DatasetProfile, usize)> {
        let table = RawTable::from_csv_str(content)?;
        let profile = self.ingest_table(source_id, &table)?;
        let written = self.ingest_document(source_id, &table.to_text(), embedder)?;
        Ok((profile, written))
    }

    #[inline]
    pub fn get_profile(&self, source_id: &str) -> Result<Option<DatasetProfile>> {
        self.storage.get(source_id)
    }

    pub fn list_profiles(&self) -> Result<Vec<String>> {
        self.storage.list()
    }

    pub fn remove_profile(&self, source_id: &str) -> Result<bool> {
        self.storage.remove(source_id)
    }

    // ==================== Fragments ====================

    pub fn ingest_document(
        &self,
        document_id: &str,
        text: &str,
        embedder: &dyn Embedder,
    ) -> Result<usize> {
        self.retriever
            .ingest_document(document_id, text, embedder, self.storage.as_ref())
    }

    /// Store pre-embedded fragments as-is
    pub fn append_fragments(&self, fragments: Vec<FragmentRecord>) -> Result<usize> {
        let written = self.storage.append(fragments)?;
        tracing::info!("Appended {} fragments", written);
        Ok(written)
    }

    pub fn fragment_count(&self) -> Result<usize> {
        self.storage.count()
    }

    // ==================== Routing ====================

    /// Rank the working set against `query` and route; `limit` overrides the configured top-K
    pub fn route_query(&self, query: &Vector, limit: Option<usize>) -> Result<RoutingDecision> {
        let k = limit.unwrap_or(self.retriever.config().top_k);
        self.retriever.route_vector_top(query, k, self.storage.as_ref())
    }

    pub fn route_text(&self, question: &str, embedder: &dyn Embedder) -> Result<RoutingDecision> {
        self.retriever.route_text(question, embedder, self.storage.as_ref())
    }

    pub fn plan_chat(
        &self,
        messages: &[ChatMessage],
        embedder: &dyn Embedder,
    ) -> Result<(RoutingDecision, PromptPlan)> {
        self.retriever.plan_chat(messages, embedder, self.storage.as_ref())
    }

    /// Context-only answer plan for `query`; `limit` overrides the configured top-K
    pub fn query_strict(
        &self,
        query: &Vector,
        limit: Option<usize>,
        question: &str,
    ) -> Result<(Vec<ScoredFragment>, PromptPlan)> {
        let k = limit.unwrap_or(self.retriever.config().top_k);
        self.retriever.plan_strict(query, k, question, self.storage.as_ref())
    }

    pub fn query_text_strict(
        &self,
        question: &str,
        embedder: &dyn Embedder,
    ) -> Result<(Vec<ScoredFragment>, PromptPlan)> {
        self.retriever.query_text_strict(question, embedder, self.storage.as_ref())
    }

    /// Prompt plan for an already-made decision
    pub fn plan(&self, decision: &RoutingDecision, question: &str, history: &[ChatMessage]) -> PromptPlan {
        PromptPlan::build(decision, question, history, self.retriever.config().history_window)
    }
}
