//! Counter codec coercion tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tally_core::codec::{encode_counter, parse_counter};

#[test]
fn absent_reads_as_zero() {
    assert_eq!(parse_counter(None), 0);
}

#[test]
fn plain_decimal() {
    assert_eq!(parse_counter(Some("42")), 42);
    assert_eq!(parse_counter(Some(" 7\n")), 7);
    assert_eq!(parse_counter(Some("+3")), 3);
    assert_eq!(parse_counter(Some("0009")), 9);
}

#[test]
fn malformed_values_coerce_to_zero() {
    for raw in ["", "abc", "NaN", "Infinity", "-5", "3.5", "1e3", "12abc", "99999999999999999999999"] {
        assert_eq!(parse_counter(Some(raw)), 0, "raw={raw:?}");
    }
}

#[test]
fn encode_is_plain_decimal() {
    assert_eq!(encode_counter(0), "0");
    assert_eq!(encode_counter(1234), "1234");
    assert_eq!(parse_counter(Some(&encode_counter(u64::MAX))), u64::MAX);
}
