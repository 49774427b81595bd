// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use crate::identity::UserAgent;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::StatusCode;
use std::borrow::Cow;
use tracing::{debug, trace};
use url::Url;

/// One completed GET exchange.
///
/// The response headers travel with the body so that callers (the rate-limit
/// guard, the image passthrough) inspect exactly the headers of this response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Fetched {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Blocking HTTP GET with the client identity attached.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: UserAgent,
}

impl Fetcher {
    pub fn new(client: Client, user_agent: UserAgent) -> Self {
        Self { client, user_agent }
    }

    pub fn user_agent(&self) -> &UserAgent {
        &self.user_agent
    }

    /// Perform a single GET. Any status is returned as-is; only failures to
    /// obtain a response at all are errors. No retries.
    pub fn fetch(&self, url: &Url) -> Result<Fetched> {
        trace!(target: "discogs", "GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .send()?;

        let status = response.status();
        debug!(target: "discogs", "response status: {}", status);

        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        trace!(target: "discogs", bytes = body.len(), "response body received");

        Ok(Fetched {
            status,
            headers,
            body,
        })
    }
}
