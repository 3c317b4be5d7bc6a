//! Counter codec.
//!
//! The store has no integer type, so counters are decimal strings. Every read
//! path goes through [`parse_counter`]: absent, empty, negative, fractional, or
//! otherwise malformed values read as `0` instead of failing.
//!
//! Prefix parsing is rejected on purpose: `"12abc"` and `"3.5"` read as `0`,
//! not `12` and `3`. Only a whole, trimmed decimal `u64` counts.

/// Parse a stored counter, coercing anything unusable to `0`.
pub fn parse_counter(raw: Option<&str>) -> u64 {
    let Some(s) = raw else { return 0 };
    s.trim().parse::<u64>().unwrap_or(0)
}

/// Encode a counter for storage.
pub fn encode_counter(v: u64) -> String {
    v.to_string()
}
