use std::sync::Arc;

use futures_util::future::join_all;
use tokio::task::JoinHandle;

use tally_core::calendar::{Calendar, RetentionWindow};
use tally_core::clock::{iso_timestamp, Clock};
use tally_core::codec::{encode_counter, parse_counter};
use tally_core::error::Result;
use tally_core::keys::{LAST_UPDATED, TOTAL_VISITS};
use tally_core::stats::VisitStats;

use crate::store::KvStore;

/// Outcome of one retention sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Reads and updates visit counters.
///
/// `record_visit` is a plain read-modify-write across three keys with no
/// coordination: two concurrent visits can read the same value and one
/// increment is lost. Counts are approximate.
pub struct CounterService {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
    retention: RetentionWindow,
}

impl CounterService {
    pub fn new(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        calendar: Calendar,
        retention: RetentionWindow,
    ) -> Self {
        Self {
            store,
            clock,
            calendar,
            retention,
        }
    }

    /// Current totals. `last_updated` is the time of the read, not a stored stamp.
    pub async fn stats(&self) -> Result<VisitStats> {
        let now = self.clock.now();
        let daily_key = self.calendar.today_key(now);

        let (total, daily) = tokio::try_join!(
            self.store.get(TOTAL_VISITS),
            self.store.get(&daily_key)
        )?;

        Ok(VisitStats {
            total_visits: parse_counter(total.as_deref()),
            daily_visits: parse_counter(daily.as_deref()),
            last_updated: iso_timestamp(now),
        })
    }

    /// Count one visit against the total and today's bucket.
    pub async fn record_visit(&self) -> Result<VisitStats> {
        let now = self.clock.now();
        let daily_key = self.calendar.today_key(now);

        let (total, daily) = tokio::try_join!(
            self.store.get(TOTAL_VISITS),
            self.store.get(&daily_key)
        )?;

        let total = parse_counter(total.as_deref()).saturating_add(1);
        let daily = parse_counter(daily.as_deref()).saturating_add(1);
        let stamp = iso_timestamp(now);

        tokio::try_join!(
            self.store.put(TOTAL_VISITS, encode_counter(total)),
            self.store.put(&daily_key, encode_counter(daily)),
            self.store.put(LAST_UPDATED, stamp.clone())
        )?;

        tracing::debug!(total, daily, bucket = %daily_key, "visit recorded");

        Ok(VisitStats {
            total_visits: total,
            daily_visits: daily,
            last_updated: stamp,
        })
    }

    /// Zero the all-time total and today's bucket.
    pub async fn reset(&self) -> Result<()> {
        let daily_key = self.calendar.today_key(self.clock.now());

        tokio::try_join!(
            self.store.put(TOTAL_VISITS, encode_counter(0)),
            self.store.put(&daily_key, encode_counter(0))
        )?;

        tracing::warn!(bucket = %daily_key, "visit counters reset");
        Ok(())
    }

    /// Delete the day buckets inside the retention window.
    ///
    /// Never fails: each failed delete is logged and counted in the report.
    pub async fn cleanup_old_daily_buckets(&self) -> CleanupReport {
        let keys = self.calendar.retention_keys(self.clock.now(), self.retention);
        let results = join_all(keys.iter().map(|k| self.store.delete(k))).await;

        let mut report = CleanupReport {
            attempted: keys.len(),
            failed: 0,
        };
        for (key, res) in keys.iter().zip(results) {
            if let Err(e) = res {
                report.failed += 1;
                tracing::warn!(key = %key, error = %e, "retention delete failed");
            }
        }

        tracing::debug!(
            attempted = report.attempted,
            failed = report.failed,
            "retention cleanup finished"
        );
        report
    }

    /// Run cleanup on a detached task.
    ///
    /// The task outlives the caller; dropping the handle does not cancel it.
    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<CleanupReport> {
        let svc = Arc::clone(self);
        tokio::spawn(async move { svc.cleanup_old_daily_buckets().await })
    }
}
