// SPDX-License-Identifier: GPL-3.0-or-later

use crate::client::DiscogsClient;
use crate::cursor::{PageQuery, PagedCursor};
use crate::extract::SearchResults;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a Discogs entity (release, master, artist, label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscogsId(pub u64);

impl From<u64> for DiscogsId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DiscogsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Release search against `database/search`.
///
/// The request itself never changes; [`SearchRequest::bind`] hands out a fresh
/// cursor that owns its own copy of the query and advances its own page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    page: u32,
}

impl SearchRequest {
    pub const PATH: &'static str = "database/search";
    /// Only releases are searched; the `type` parameter is fixed.
    pub const RESULT_KIND: &'static str = "release";

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Start from `page` instead of the first one. Pages are 1-based; 0 is treated as 1.
    pub fn starting_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Create an unbound cursor over this search. Nothing is fetched until the
    /// cursor is first accessed.
    pub fn bind(&self, client: &DiscogsClient) -> PagedCursor<SearchResults> {
        PagedCursor::new(client.clone(), self.page_query(), SearchResults)
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(Self::PATH)
            .param("q", &self.query)
            .param("type", Self::RESULT_KIND)
            .starting_page(self.page)
    }
}

/// Image bytes passed through from Discogs, with the headers worth forwarding.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub bytes: Vec<u8>,
    /// Only `Content-Type`, `Expires`, `Cache-Control`, `Content-Length` and `Date`.
    pub headers: HeaderMap,
}

impl RawImage {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_page_query() {
        let query = SearchRequest::new("The Mothers").page_query();

        assert_eq!(query.path(), "database/search");
        assert_eq!(query.page(), 1);
        assert_eq!(
            query.params(),
            &[
                ("q".to_string(), "The Mothers".to_string()),
                ("type".to_string(), "release".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_request_starting_page_is_one_based() {
        assert_eq!(SearchRequest::new("Zappa").starting_page(0).page(), 1);
        assert_eq!(
            SearchRequest::new("Zappa").starting_page(4).page_query().page(),
            4
        );
    }

    #[test]
    fn test_discogs_id_display() {
        assert_eq!(DiscogsId(2754221).to_string(), "2754221");
        assert_eq!(DiscogsId::from(7), DiscogsId(7));
    }
}
