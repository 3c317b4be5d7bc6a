//! Shared application state for the tally server.
//!
//! Holds the validated config and, when a store is bound, the counter
//! service built on it. There is no other shared mutable state: every
//! counter lives in the store.

use std::sync::Arc;

use tally_core::clock::Clock;
use tally_core::error::{Result, TallyError};

use crate::config::TallyConfig;
use crate::counter::CounterService;
use crate::store::KvStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: TallyConfig,
    clock: Arc<dyn Clock>,
    counter: Option<Arc<CounterService>>,
}

impl AppState {
    /// Build application state. `store == None` models a missing binding:
    /// the server still starts but answers every request with NotConfigured.
    pub fn new(
        cfg: TallyConfig,
        store: Option<Arc<dyn KvStore>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let calendar = cfg.calendar.build()?;
        let retention = cfg.retention.build()?;

        let counter = store.map(|store| {
            Arc::new(CounterService::new(
                store,
                Arc::clone(&clock),
                calendar,
                retention,
            ))
        });

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, clock, counter }),
        })
    }

    pub fn cfg(&self) -> &TallyConfig {
        &self.inner.cfg
    }

    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    pub fn has_store(&self) -> bool {
        self.inner.counter.is_some()
    }

    pub fn counter(&self) -> Result<Arc<CounterService>> {
        self.inner
            .counter
            .as_ref()
            .map(Arc::clone)
            .ok_or(TallyError::NotConfigured)
    }

    /// `true` when no token is configured or `presented` matches it.
    pub fn admin_authorized(&self, presented: Option<&str>) -> bool {
        match self.inner.cfg.admin.token.as_deref() {
            None => true,
            Some(expected) => presented == Some(expected),
        }
    }

    /// Routes advertised by the 404 payload.
    pub fn available_endpoints(&self) -> Vec<String> {
        let p = &self.inner.cfg.server.api_prefix;
        vec![
            "GET /health".to_string(),
            format!("GET {p}/stats"),
            format!("POST {p}/visit"),
            format!("POST {p}/admin/reset"),
        ]
    }
}
