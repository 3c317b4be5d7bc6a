//! Shared test doubles and helpers for tally-server integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Barrier;
use tower::ServiceExt;

use tally_core::calendar::{Calendar, RetentionWindow};
use tally_core::clock::ManualClock;
use tally_core::error::{Result, TallyError};
use tally_server::app_state::AppState;
use tally_server::config::{self, TallyConfig};
use tally_server::counter::CounterService;
use tally_server::router::build_router;
use tally_server::store::{KvStore, MemoryStore};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// 2024-03-10 12:00 in UTC+9.
pub fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(utc(2024, 3, 10, 3, 0, 0)))
}

pub fn memory_config() -> TallyConfig {
    config::load_from_str("version: 1\nstore:\n  backend: memory\n").unwrap()
}

pub fn service(store: Arc<dyn KvStore>, clock: Arc<ManualClock>) -> Arc<CounterService> {
    Arc::new(CounterService::new(
        store,
        clock,
        Calendar::default(),
        RetentionWindow::default(),
    ))
}

pub fn app(cfg: TallyConfig, store: Option<Arc<dyn KvStore>>, clock: Arc<ManualClock>) -> Router {
    let state = AppState::new(cfg, store, clock).unwrap();
    build_router(state)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose operations can be made to fail.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_deletes: bool,
}

fn backend_down() -> TallyError {
    TallyError::store("backend down: connection refused by 10.0.0.7")
}

#[async_trait]
impl KvStore for FaultyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(backend_down());
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        if self.fail_writes {
            return Err(backend_down());
        }
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_deletes {
            return Err(backend_down());
        }
        self.inner.delete(key).await
    }
}

/// Holds readers of `gate_key` until `parties` of them have read, so that
/// concurrent read-modify-write cycles all observe the same value.
pub struct GatedStore {
    pub inner: MemoryStore,
    gate_key: &'static str,
    barrier: Barrier,
}

impl GatedStore {
    pub fn new(gate_key: &'static str, parties: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            gate_key,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl KvStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let v = self.inner.get(key).await?;
        if key == self.gate_key {
            self.barrier.wait().await;
        }
        Ok(v)
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await
    }
}
