//! tally core: counter codec, fixed-offset calendar, clock, and error types.
//!
//! This crate defines the storage-level contracts shared by the server and
//! its tests: how counters are encoded as strings, how a calendar day maps to
//! a bucket key, and the error surface every layer reports through. It carries
//! no transport or async runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Malformed stored values never surface as errors: they are coerced by
//! [`codec::parse_counter`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod calendar;
pub mod clock;
pub mod codec;
pub mod error;
pub mod keys;
pub mod stats;

/// Shared result type.
pub use error::{Result, TallyError};
