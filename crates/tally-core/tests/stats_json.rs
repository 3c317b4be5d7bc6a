//! Wire shape of `VisitStats`.

#![allow(clippy::unwrap_used)]

use tally_core::stats::VisitStats;

#[test]
fn serializes_camel_case() {
    let s = VisitStats {
        total_visits: 3,
        daily_visits: 1,
        last_updated: "2024-05-01T03:04:05.678Z".into(),
    };
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["totalVisits"], 3);
    assert_eq!(v["dailyVisits"], 1);
    assert_eq!(v["lastUpdated"], "2024-05-01T03:04:05.678Z");
}
