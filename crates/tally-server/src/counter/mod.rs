//! Visitor counter service.
//!
//! Stateless over an injected [`KvStore`](crate::store::KvStore): every call
//! reads and writes the store directly, nothing is cached in-process.

pub mod service;

pub use service::{CleanupReport, CounterService};
