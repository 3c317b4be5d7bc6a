//! Store key layout.
//!
//! The store is flat: every counter lives under its own string key.

/// All-time visit count.
pub const TOTAL_VISITS: &str = "total_visits";

/// Timestamp of the most recent visit write.
pub const LAST_UPDATED: &str = "last_updated";

/// Prefix for per-day buckets (`daily_YYYY-MM-DD`).
pub const DAILY_PREFIX: &str = "daily_";
