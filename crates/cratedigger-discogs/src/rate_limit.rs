// SPDX-License-Identifier: GPL-3.0-or-later

//! Detection of exhausted Discogs quotas.
//!
//! Discogs does not throttle clients itself; it reports `X-RateLimit-Limit: 0`
//! once the quota is gone, with the kind of limit and the reset time in two
//! companion headers. Nothing here waits or retries: the guard only turns the
//! marker into a typed error for the caller.

use crate::error::RateLimitError;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::HeaderMap;
use tracing::warn;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const TYPE_HEADER: &str = "x-ratelimit-type";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Exact limit value marking an exhausted quota.
const EXHAUSTED: &[u8] = b"0";

lazy_static! {
    static ref LIMIT_TYPE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_]+$").expect("valid limit type regex");
    static ref RESET_REGEX: Regex = Regex::new(r"^[0-9]+$").expect("valid reset regex");
}

/// Fail with [`RateLimitError`] when `headers` carry the exhausted-quota marker.
pub fn check(headers: &HeaderMap) -> Result<(), RateLimitError> {
    let exhausted = headers
        .get_all(LIMIT_HEADER)
        .iter()
        .any(|value| value.as_bytes() == EXHAUSTED);

    if !exhausted {
        return Ok(());
    }

    let error = RateLimitError {
        limit_type: companion(headers, TYPE_HEADER, &LIMIT_TYPE_REGEX),
        reset: companion(headers, RESET_HEADER, &RESET_REGEX)
            .and_then(|reset| reset.parse().ok()),
    };

    warn!(
        target: "discogs",
        limit_type = ?error.limit_type,
        reset = ?error.reset,
        "rate limit exhausted"
    );

    Err(error)
}

/// First value of `name` matching `pattern`. Absent or malformed values are not fatal.
fn companion(headers: &HeaderMap, name: &str, pattern: &Regex) -> Option<String> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| pattern.is_match(value))
        .map(str::to_string)
}
