//! Key-value store seam.
//!
//! The counter service only ever talks to a [`KvStore`]: string keys, string
//! values, get/put/delete. No transactions, no TTLs, no atomic increment.
//! Backends report failures as `TallyError::StoreUnavailable`.

pub mod memory;
pub mod snapshot;

use std::sync::Arc;

use async_trait::async_trait;

use tally_core::error::Result;

use crate::config::{StoreBackend, StoreSection};

pub use memory::MemoryStore;
pub use snapshot::SnapshotStore;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
    /// Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// A store built from config. Snapshot stores stay typed so the binary can
/// drive autosave and the final save on shutdown.
#[derive(Clone)]
pub enum OpenedStore {
    Memory(Arc<MemoryStore>),
    Snapshot(Arc<SnapshotStore>),
}

impl OpenedStore {
    pub fn as_kv(&self) -> Arc<dyn KvStore> {
        match self {
            OpenedStore::Memory(s) => Arc::clone(s) as Arc<dyn KvStore>,
            OpenedStore::Snapshot(s) => Arc::clone(s) as Arc<dyn KvStore>,
        }
    }
}

pub async fn open(section: &StoreSection) -> Result<OpenedStore> {
    match section.backend {
        StoreBackend::Memory => Ok(OpenedStore::Memory(Arc::new(MemoryStore::new()))),
        StoreBackend::Snapshot => {
            let path = section.snapshot_path.clone().unwrap_or_default();
            let store = SnapshotStore::open(path).await?;
            Ok(OpenedStore::Snapshot(Arc::new(store)))
        }
    }
}
