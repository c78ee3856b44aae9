//! Persistence contracts
//!
//! The profiler and the retriever only talk to storage through these traits.
//! Implementations live in `insightx-storage`.

use crate::{DatasetProfile, FragmentRecord, Result};

/// Keyed storage for dataset profiles.
///
/// At most one profile exists per source id; `upsert` replaces any previous
/// profile for that source, last writer wins.
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the profile for `source_id`, returning what was stored
    fn upsert(&self, source_id: &str, profile: DatasetProfile) -> Result<DatasetProfile>;

    fn get(&self, source_id: &str) -> Result<Option<DatasetProfile>>;

    /// Source ids with a stored profile, sorted
    fn list(&self) -> Result<Vec<String>>;

    /// Remove the profile for `source_id`; returns whether one existed
    fn remove(&self, source_id: &str) -> Result<bool>;
}

/// Append-only storage for embedded fragments
pub trait FragmentStore: Send + Sync {
    /// Append fragments, returning how many were written
    fn append(&self, fragments: Vec<FragmentRecord>) -> Result<usize>;

    /// The first `limit` fragments in storage (insertion) order
    fn read_fragments(&self, limit: usize) -> Result<Vec<FragmentRecord>>;

    fn count(&self) -> Result<usize>;
}
