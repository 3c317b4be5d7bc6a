//! Fixed-offset calendar and retention window tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use tally_core::calendar::{Calendar, RetentionWindow};
use tally_core::clock::{iso_timestamp, Clock, ManualClock};
use tally_core::error::ClientCode;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

#[test]
fn default_calendar_is_utc_plus_nine() {
    let cal = Calendar::default();
    assert_eq!(cal.offset().local_minus_utc(), 9 * 3600);
    assert_eq!(cal.today_key(utc(2024, 3, 10, 14, 59, 59)), "daily_2024-03-10");
    assert_eq!(cal.today_key(utc(2024, 3, 10, 15, 0, 0)), "daily_2024-03-11");
}

#[test]
fn year_rollover_follows_offset() {
    let cal = Calendar::default();
    assert_eq!(cal.today_key(utc(2023, 12, 31, 15, 0, 0)), "daily_2024-01-01");
}

#[test]
fn negative_offset() {
    let cal = Calendar::new(-5).unwrap();
    assert_eq!(cal.today_key(utc(2024, 3, 10, 3, 0, 0)), "daily_2024-03-09");
}

#[test]
fn offset_out_of_range_is_rejected() {
    let err = Calendar::new(15).expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::BadRequest);
    assert!(Calendar::new(-13).is_err());
}

#[test]
fn retention_keys_cover_days_seven_through_thirty() {
    let cal = Calendar::default();
    // 2024-03-31 in UTC+9
    let now = utc(2024, 3, 31, 0, 0, 0);
    let keys = cal.retention_keys(now, RetentionWindow::default());

    assert_eq!(keys.len(), 24);
    assert_eq!(keys.first().unwrap(), "daily_2024-03-24");
    assert_eq!(keys.last().unwrap(), "daily_2024-03-01");
    assert!(!keys.contains(&"daily_2024-03-25".to_string()));
    assert!(!keys.contains(&"daily_2024-02-29".to_string()));
    assert!(!keys.contains(&cal.today_key(now)));
}

#[test]
fn retention_window_validation() {
    assert!(RetentionWindow::new(0, 5).is_err());
    assert!(RetentionWindow::new(10, 5).is_err());
    assert!(RetentionWindow::new(1, 4000).is_err());
    let w = RetentionWindow::new(3, 3).unwrap();
    let keys = Calendar::default().retention_keys(utc(2024, 1, 10, 0, 0, 0), w);
    assert_eq!(keys, vec!["daily_2024-01-07".to_string()]);
}

#[test]
fn manual_clock_advances() {
    let clock = ManualClock::new(utc(2024, 1, 1, 0, 0, 0));
    clock.advance(Duration::days(1));
    assert_eq!(clock.now(), utc(2024, 1, 2, 0, 0, 0));
    clock.set(utc(2020, 6, 1, 12, 0, 0));
    assert_eq!(clock.now(), utc(2020, 6, 1, 12, 0, 0));
}

#[test]
fn iso_timestamp_has_millis_and_z() {
    let t = utc(2024, 5, 1, 3, 4, 5) + Duration::milliseconds(678);
    assert_eq!(iso_timestamp(t), "2024-05-01T03:04:05.678Z");
}
