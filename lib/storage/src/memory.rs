use insightx_core::{DatasetProfile, FragmentRecord, FragmentStore, ProfileStore, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Volatile store for tests and embedded use
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, DatasetProfile>>,
    fragments: RwLock<Vec<FragmentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn upsert(&self, source_id: &str, profile: DatasetProfile) -> Result<DatasetProfile> {
        self.profiles
            .write()
            .insert(source_id.to_string(), profile.clone());
        Ok(profile)
    }

    fn get(&self, source_id: &str) -> Result<Option<DatasetProfile>> {
        Ok(self.profiles.read().get(source_id).cloned())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.profiles.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn remove(&self, source_id: &str) -> Result<bool> {
        Ok(self.profiles.write().remove(source_id).is_some())
    }
}

impl FragmentStore for MemoryStore {
    fn append(&self, fragments: Vec<FragmentRecord>) -> Result<usize> {
        let n = fragments.len();
        self.fragments.write().extend(fragments);
        Ok(n)
    }

    fn read_fragments(&self, limit: usize) -> Result<Vec<FragmentRecord>> {
        Ok(self.fragments.read().iter().take(limit).cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.fragments.read().len())
    }
}
