//! Memory store persisted to a JSON snapshot file.
//!
//! The file is a flat JSON object (`{"total_visits": "12", ...}`). It is read
//! once on open, rewritten periodically by [`SnapshotStore::autosave_loop`],
//! and once more on shutdown. Writes go to a temp file first and are renamed
//! into place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use tally_core::error::{Result, TallyError};

use super::{KvStore, MemoryStore};

pub struct SnapshotStore {
    inner: MemoryStore,
    path: PathBuf,
    /// Held across write + rename; saves share one temp file.
    save_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Load `path` if it exists; a missing file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no snapshot found, starting empty");
                return Ok(Self::with_entries(MemoryStore::new(), path));
            }
            Err(e) => {
                return Err(TallyError::store(format!(
                    "read snapshot {} failed: {e}",
                    path.display()
                )))
            }
        };

        let inner = MemoryStore::from_entries(parse_snapshot(&path, &data)?);
        tracing::info!(path = %path.display(), entries = inner.len(), "snapshot loaded");
        Ok(Self::with_entries(inner, path))
    }

    fn with_entries(inner: MemoryStore, path: PathBuf) -> Self {
        Self {
            inner,
            path,
            save_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    /// Write all entries to disk. Returns the number of entries written.
    pub async fn save(&self) -> Result<usize> {
        let _guard = self.save_lock.lock().await;
        let entries: BTreeMap<String, String> = self.inner.entries().into_iter().collect();
        let count = entries.len();

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| TallyError::Internal(format!("serialize snapshot failed: {e}")))?;

        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, json.as_bytes()).await.map_err(|e| {
            TallyError::store(format!("write snapshot {} failed: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            TallyError::store(format!("rename snapshot {} failed: {e}", self.path.display()))
        })?;

        Ok(count)
    }

    /// Background task: save every `every`. Failures are logged, never fatal.
    pub async fn autosave_loop(self: Arc<Self>, every: Duration) {
        loop {
            sleep(every).await;
            match self.save().await {
                Ok(n) => tracing::debug!(entries = n, "snapshot saved"),
                Err(e) => tracing::warn!(error = %e, "snapshot autosave failed"),
            }
        }
    }
}

fn parse_snapshot(path: &Path, data: &str) -> Result<Vec<(String, String)>> {
    let json: Value = serde_json::from_str(data).map_err(|e| {
        TallyError::store(format!("snapshot {} is not valid json: {e}", path.display()))
    })?;

    let Value::Object(obj) = json else {
        return Err(TallyError::store(format!(
            "snapshot {} is not a json object",
            path.display()
        )));
    };

    let mut out = Vec::with_capacity(obj.len());
    for (k, v) in obj {
        match v {
            Value::String(s) => out.push((k, s)),
            other => tracing::warn!(key = %k, value = %other, "skipping non-string snapshot entry"),
        }
    }
    Ok(out)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

#[async_trait]
impl KvStore for SnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await
    }
}
