//! Fixed-offset calendar for day buckets.
//!
//! "Today" is the calendar date of the current instant shifted by a fixed
//! offset (UTC+9 by default). The host timezone is never consulted and there
//! is no DST handling. The same rule drives both the current bucket key and
//! the keys targeted by retention cleanup.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, Utc};

use crate::error::{Result, TallyError};
use crate::keys::DAILY_PREFIX;

/// Default offset in hours (UTC+9).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

const SECS_PER_HOUR: i32 = 3600;

/// Maps instants to day-bucket keys.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Self { offset: Utc.fix() })
    }
}

impl Calendar {
    /// Build a calendar for a whole-hour offset from UTC (-12..=14).
    pub fn new(utc_offset_hours: i32) -> Result<Self> {
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(TallyError::BadRequest(format!(
                "utc offset must be between -12 and 14 hours (got {utc_offset_hours})"
            )));
        }
        let offset = FixedOffset::east_opt(utc_offset_hours * SECS_PER_HOUR).ok_or_else(|| {
            TallyError::BadRequest(format!("invalid utc offset: {utc_offset_hours}"))
        })?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `now` in this calendar.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// Bucket key for a given date.
    pub fn day_key(&self, date: NaiveDate) -> String {
        format!("{DAILY_PREFIX}{}", date.format("%Y-%m-%d"))
    }

    /// Bucket key for the day containing `now`.
    pub fn today_key(&self, now: DateTime<Utc>) -> String {
        self.day_key(self.today(now))
    }

    /// Bucket keys for every day inside `window`, counted back from today.
    pub fn retention_keys(&self, now: DateTime<Utc>, window: RetentionWindow) -> Vec<String> {
        let today = self.today(now);
        (window.min_age_days..=window.max_age_days)
            .filter_map(|age| today.checked_sub_days(Days::new(u64::from(age))))
            .map(|date| self.day_key(date))
            .collect()
    }
}

/// Day ages (inclusive) whose buckets are eligible for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow {
    pub min_age_days: u32,
    pub max_age_days: u32,
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self {
            min_age_days: 7,
            max_age_days: 30,
        }
    }
}

impl RetentionWindow {
    /// Today's bucket (age 0) can never fall inside the window.
    pub fn new(min_age_days: u32, max_age_days: u32) -> Result<Self> {
        if min_age_days == 0 {
            return Err(TallyError::BadRequest(
                "retention.min_age_days must be at least 1".into(),
            ));
        }
        if max_age_days < min_age_days {
            return Err(TallyError::BadRequest(
                "retention.max_age_days must be >= min_age_days".into(),
            ));
        }
        if max_age_days > 3650 {
            return Err(TallyError::BadRequest(
                "retention.max_age_days must be <= 3650".into(),
            ));
        }
        Ok(Self {
            min_age_days,
            max_age_days,
        })
    }
}
