// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cursor::{PageQuery, PagedCursor};
use crate::decode::{decode_document, decode_page, PageResponse};
use crate::error::{DiscogsError, Result};
use crate::extract::{ArtistReleases, SearchResults};
use crate::fetch::{Fetched, Fetcher};
use crate::identity::UserAgent;
use crate::models::{DiscogsId, RawImage, SearchRequest};
use crate::rate_limit;
use moka::sync::Cache;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderName, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, DATE, EXPIRES,
};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const DISCOGS_API_BASE: &str = "https://api.discogs.com";

/// Response headers forwarded with passthrough images.
const IMAGE_HEADERS: [HeaderName; 5] = [CONTENT_TYPE, EXPIRES, CACHE_CONTROL, CONTENT_LENGTH, DATE];

/// Read-only Discogs API client.
///
/// Cloning is cheap and shares the connection pool, the identity and the
/// optional release cache. Cursors handed out by the client hold a clone but
/// keep their paging state to themselves.
#[derive(Clone)]
pub struct DiscogsClient {
    fetcher: Fetcher,
    /// Base URL stored with exactly one trailing slash.
    base_url: Url,
    release_cache: Option<Cache<DiscogsId, Value>>,
}

impl DiscogsClient {
    /// Create a client identified by `user_agent`, with default settings otherwise.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        Self::builder().user_agent(user_agent).build()
    }

    pub fn builder() -> DiscogsClientBuilder {
        DiscogsClientBuilder::default()
    }

    pub fn user_agent(&self) -> &UserAgent {
        self.fetcher.user_agent()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lazily iterate every release matching `query`.
    ///
    /// # Example
    /// ```no_run
    /// # use cratedigger_discogs::DiscogsClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DiscogsClient::new("MyPersonalClient/0.1 +http://mypersonalclient.com")?;
    /// for entry in client.search_releases("Zappa").take(10) {
    ///     let (id, _release) = entry?;
    ///     println!("{id}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_releases(&self, query: &str) -> PagedCursor<SearchResults> {
        SearchRequest::new(query).bind(self)
    }

    /// Lazily iterate the releases and masters credited to an artist.
    pub fn artist_releases(&self, artist_id: DiscogsId) -> PagedCursor<ArtistReleases> {
        let query = PageQuery::new(format!("artists/{artist_id}/releases"));
        PagedCursor::new(self.clone(), query, ArtistReleases)
    }

    /// Fetch everything Discogs knows about one release.
    ///
    /// # Example
    /// ```no_run
    /// # use cratedigger_discogs::{DiscogsClient, DiscogsId};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DiscogsClient::new("MyPersonalClient/0.1 +http://mypersonalclient.com")?;
    /// let release = client.release(DiscogsId(2754221))?;
    /// println!("{}", release["title"]);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(release_id = %id))]
    pub fn release(&self, id: DiscogsId) -> Result<Value> {
        if let Some(cached) = self.release_cache.as_ref().and_then(|cache| cache.get(&id)) {
            debug!(target: "discogs", "release served from cache");
            return Ok(cached);
        }

        let url = self.base_url.join(&format!("releases/{id}"))?;
        let fetched = self.fetch_checked(&url)?;
        let release = decode_document(&fetched.body)?;

        if !release.is_object() {
            return Err(DiscogsError::contract(format!(
                "release {id} is not a JSON object"
            )));
        }

        if let Some(cache) = &self.release_cache {
            cache.insert(id, release.clone());
        }

        Ok(release)
    }

    /// Download an image (typically a URL found in a release's `images`) with
    /// this client's identity, keeping only the headers worth forwarding.
    #[instrument(skip(self))]
    pub fn image(&self, uri: &str) -> Result<RawImage> {
        let url = Url::parse(uri)?;
        let fetched = self.fetch_checked(&url)?;

        let mut headers = HeaderMap::new();
        for name in IMAGE_HEADERS {
            for value in fetched.headers.get_all(&name) {
                headers.append(name.clone(), value.clone());
            }
        }

        Ok(RawImage {
            bytes: fetched.body,
            headers,
        })
    }

    /// Fetch and decode one page of a list endpoint.
    #[instrument(skip(self), fields(path = query.path(), page = query.page()))]
    pub(crate) fn fetch_page(&self, query: &PageQuery) -> Result<PageResponse> {
        let mut url = self.base_url.join(query.path())?;
        url.query_pairs_mut()
            .extend_pairs(query.params())
            .append_pair("page", &query.page().to_string());

        let fetched = self.fetch_checked(&url)?;
        decode_page(&fetched.body)
    }

    /// GET `url`, then apply the rate-limit guard and the status check.
    fn fetch_checked(&self, url: &Url) -> Result<Fetched> {
        let fetched = self.fetcher.fetch(url)?;
        rate_limit::check(&fetched.headers)?;

        if !fetched.status.is_success() {
            return Err(DiscogsError::HttpStatus {
                status: fetched.status,
                body: fetched.text().into_owned(),
            });
        }

        Ok(fetched)
    }
}

impl fmt::Debug for DiscogsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscogsClient")
            .field("user_agent", self.user_agent())
            .field("base_url", &self.base_url.as_str())
            .field("release_cache", &self.release_cache.is_some())
            .finish()
    }
}

/// Builder for configuring a Discogs client.
#[derive(Debug)]
pub struct DiscogsClientBuilder {
    user_agent: Option<String>,
    base_url: String,
    timeout: Duration,
    release_cache_capacity: u64,
}

impl Default for DiscogsClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            base_url: DISCOGS_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            release_cache_capacity: 0,
        }
    }
}

impl DiscogsClientBuilder {
    /// Identity sent as `User-Agent`; validated by [`build`](Self::build).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep up to `capacity` release lookups in memory. 0 disables the cache.
    pub fn release_cache_capacity(mut self, capacity: u64) -> Self {
        self.release_cache_capacity = capacity;
        self
    }

    /// Build the Discogs client.
    pub fn build(self) -> Result<DiscogsClient> {
        let user_agent = match self.user_agent {
            Some(value) => UserAgent::parse(value)?,
            None => UserAgent::default(),
        };

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent.as_str())
            .build()?;

        // Trailing slash so relative resource paths join below the base path.
        let base_url = Url::parse(&format!("{}/", self.base_url.trim_end_matches('/')))?;

        let release_cache =
            (self.release_cache_capacity > 0).then(|| Cache::new(self.release_cache_capacity));

        debug!(target: "discogs", base_url = %base_url, "initialized Discogs client");

        Ok(DiscogsClient {
            fetcher: Fetcher::new(client, user_agent),
            base_url,
            release_cache,
        })
    }
}
