// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{DiscogsError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

const DEFAULT_USER_AGENT: &str = concat!(
    "Cratedigger/",
    env!("CARGO_PKG_VERSION"),
    " +https://github.com/cratedigger/cratedigger"
);

lazy_static! {
    static ref USER_AGENT_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_]+/[0-9.]+ \+?.+$").expect("valid user agent regex");
}

/// Client identity sent as `User-Agent` with every request.
///
/// Discogs asks applications to identify themselves with something close to
/// RFC 1945 (`AwesomeDiscogsBrowser/0.1 +http://adb.example.com`) and silently
/// blocks clients that don't. The value is checked once, here, and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserAgent(String);

impl UserAgent {
    /// Validate `value` against the `Name/1.2 +descriptor` shape.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if USER_AGENT_REGEX.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(DiscogsError::InvalidUserAgent(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self(DEFAULT_USER_AGENT.to_string())
    }
}

impl FromStr for UserAgent {
    type Err = DiscogsError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl AsRef<str> for UserAgent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
