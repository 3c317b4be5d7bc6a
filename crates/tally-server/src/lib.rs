//! tally server library entry.
//!
//! Wires config, the key-value store seam, the counter service, and the HTTP
//! surface into one router. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod app_state;
pub mod config;
pub mod counter;
pub mod ops;
pub mod router;
pub mod store;
