pub mod manager;
pub mod lmdb_storage;
pub mod memory;

pub use manager::StorageManager;
pub use lmdb_storage::LmdbStorage;
pub use memory::MemoryStore;
