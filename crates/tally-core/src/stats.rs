//! Visitor statistics as returned to clients.

use serde::Serialize;

/// Aggregate counters plus the instant they were observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStats {
    pub total_visits: u64,
    pub daily_visits: u64,
    pub last_updated: String,
}
