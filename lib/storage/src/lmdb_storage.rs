// LMDB-backed persistence for profiles and fragments
use anyhow::Result;
use heed::byteorder::BE;
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions};
use insightx_core::{DatasetProfile, Error, FragmentRecord, FragmentStore, ProfileStore, Vector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

const DB_PROFILES: &str = "profiles";
const DB_FRAGMENTS: &str = "fragments";

/// Default LMDB map size (1 GiB); the file grows sparsely up to this bound
pub const DEFAULT_MAP_SIZE: usize = 1024 * 1024 * 1024;

/// On-disk fragment layout. Kept separate from `FragmentRecord` because
/// bincode needs every field present.
#[derive(Debug, Serialize, Deserialize)]
struct FragmentData {
    document_id: Option<String>,
    content: String,
    embedding: Vec<f32>,
}

impl From<FragmentRecord> for FragmentData {
    fn from(f: FragmentRecord) -> Self {
        Self {
            document_id: f.document_id,
            content: f.content,
            embedding: f.embedding.into_inner(),
        }
    }
}

impl From<FragmentData> for FragmentRecord {
    fn from(f: FragmentData) -> Self {
        Self {
            document_id: f.document_id,
            content: f.content,
            embedding: Vector::new(f.embedding),
        }
    }
}

/// Profiles keyed by source id (JSON values), fragments keyed by a
/// big-endian sequence number so iteration follows insertion order.
pub struct LmdbStorage {
    env: Arc<Env>,
    profiles_db: Database<Str, Bytes>,
    fragments_db: Database<U64<BE>, Bytes>,
}

impl LmdbStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_map_size(path, DEFAULT_MAP_SIZE)
    }

    pub fn with_map_size<P: AsRef<Path>>(path: P, map_size: usize) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .open(path)?
        });

        let mut wtxn = env.write_txn()?;
        let profiles_db = env.create_database(&mut wtxn, Some(DB_PROFILES))?;
        let fragments_db = env.create_database(&mut wtxn, Some(DB_FRAGMENTS))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            profiles_db,
            fragments_db,
        })
    }

    pub fn save_profile(&self, source_id: &str, profile: &DatasetProfile) -> Result<()> {
        let data = serde_json::to_vec(profile)?;
        let mut wtxn = self.env.write_txn()?;
        self.profiles_db.put(&mut wtxn, source_id, &data)?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn load_profile(&self, source_id: &str) -> Result<Option<DatasetProfile>> {
        let rtxn = self.env.read_txn()?;
        match self.profiles_db.get(&rtxn, source_id)? {
            Some(data) => Ok(Some(serde_json::from_slice(data)?)),
            None => Ok(None),
        }
    }

    pub fn delete_profile(&self, source_id: &str) -> Result<bool> {
        let mut wtxn = self.env.write_txn()?;
        let existed = self.profiles_db.delete(&mut wtxn, source_id)?;
        wtxn.commit()?;
        Ok(existed)
    }

    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn()?;
        let mut ids = Vec::new();
        for result in self.profiles_db.iter(&rtxn)? {
            let (key, _) = result?;
            ids.push(key.to_string());
        }
        Ok(ids)
    }

    /// Append fragments after the current last sequence number in one transaction
    pub fn append_fragments(&self, fragments: Vec<FragmentRecord>) -> Result<usize> {
        let mut wtxn = self.env.write_txn()?;
        let mut next_id = match self.fragments_db.last(&wtxn)? {
            Some((id, _)) => id + 1,
            None => 0,
        };
        let count = fragments.len();
        for fragment in fragments {
            let data = bincode::serialize(&FragmentData::from(fragment))
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
            self.fragments_db.put(&mut wtxn, &next_id, &data)?;
            next_id += 1;
        }
        wtxn.commit()?;
        Ok(count)
    }

    pub fn load_fragments(&self, limit: usize) -> Result<Vec<FragmentRecord>> {
        let rtxn = self.env.read_txn()?;
        let mut fragments = Vec::new();
        for result in self.fragments_db.iter(&rtxn)?.take(limit) {
            let (_, data) = result?;
            let stored: FragmentData = bincode::deserialize(data)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            fragments.push(stored.into());
        }
        Ok(fragments)
    }

    pub fn fragment_count(&self) -> Result<usize> {
        let rtxn = self.env.read_txn()?;
        Ok(self.fragments_db.len(&rtxn)? as usize)
    }
}

fn storage_err(e: anyhow::Error) -> Error {
    Error::Storage(e.to_string())
}

impl ProfileStore for LmdbStorage {
    fn upsert(&self, source_id: &str, profile: DatasetProfile) -> insightx_core::Result<DatasetProfile> {
        self.save_profile(source_id, &profile).map_err(storage_err)?;
        Ok(profile)
    }

    fn get(&self, source_id: &str) -> insightx_core::Result<Option<DatasetProfile>> {
        self.load_profile(source_id).map_err(storage_err)
    }

    fn list(&self) -> insightx_core::Result<Vec<String>> {
        self.list_profiles().map_err(storage_err)
    }

    fn remove(&self, source_id: &str) -> insightx_core::Result<bool> {
        self.delete_profile(source_id).map_err(storage_err)
    }
}

impl FragmentStore for LmdbStorage {
    fn append(&self, fragments: Vec<FragmentRecord>) -> insightx_core::Result<usize> {
        self.append_fragments(fragments).map_err(storage_err)
    }

    fn read_fragments(&self, limit: usize) -> insightx_core::Result<Vec<FragmentRecord>> {
        self.load_fragments(limit).map_err(storage_err)
    }

    fn count(&self) -> insightx_core::Result<usize> {
        self.fragment_count().map_err(storage_err)
    }
}
