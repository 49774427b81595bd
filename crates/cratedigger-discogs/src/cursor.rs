// SPDX-License-Identifier: GPL-3.0-or-later

//! Lazy, page-aware traversal of Discogs list endpoints.
//!
//! A [`PagedCursor`] starts unbound. The first access ([`PagedCursor::rewind`])
//! fetches the starting page; afterwards [`PagedCursor::valid`] fetches the
//! next page only once the offset has walked past `per_page` items. Pages are
//! requested strictly in order, one at a time, and never ahead of need.
//!
//! The cursor also implements [`Iterator`], yielding `(id, item)` pairs and
//! stopping after the first error.

use crate::client::DiscogsClient;
use crate::decode::{PageResponse, Pagination};
use crate::error::{DiscogsError, Result};
use crate::extract::PageExtractor;
use crate::models::DiscogsId;
use serde_json::Value;
use std::iter::FusedIterator;
use tracing::debug;

/// Resource path, fixed query parameters and the page to request next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    path: String,
    params: Vec<(String, String)>,
    page: u32,
}

impl PageQuery {
    /// Query for `path` (relative to the API root), starting at page 1.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            page: 1,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn starting_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fixed parameters; `page` is not among them.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn turn_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    Fresh,
    Iterating,
    Done,
}

/// Single-use, forward-only cursor over a paged resource.
///
/// Each cursor owns its query, its current page and its offset; cursors bound
/// from the same request or client never observe each other's pages. A cursor
/// that returned an error from [`rewind`](Self::rewind) or
/// [`valid`](Self::valid) is in an unspecified position and should be dropped.
#[derive(Debug)]
pub struct PagedCursor<E: PageExtractor> {
    client: DiscogsClient,
    query: PageQuery,
    extractor: E,
    page: Option<PageResponse>,
    offset: usize,
    state: IterState,
}

impl<E: PageExtractor> PagedCursor<E> {
    pub fn new(client: DiscogsClient, query: PageQuery, extractor: E) -> Self {
        Self {
            client,
            query,
            extractor,
            page: None,
            offset: 0,
            state: IterState::Fresh,
        }
    }

    /// Whether a page has been fetched yet.
    pub fn is_bound(&self) -> bool {
        self.page.is_some()
    }

    /// Number of the page requested most recently (or to be requested first).
    pub fn page_number(&self) -> u32 {
        self.query.page()
    }

    /// Zero-based position inside the current page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.page.as_ref().map(PageResponse::pagination)
    }

    /// Reset the offset and, on first access, fetch the starting page.
    ///
    /// Once bound, the cursor never goes back to an earlier page: rewinding
    /// only returns to the start of the page currently held.
    pub fn rewind(&mut self) -> Result<()> {
        self.offset = 0;

        if self.page.is_none() {
            let page = self.client.fetch_page(&self.query)?;
            debug!(
                target: "discogs",
                path = self.query.path(),
                page = self.query.page(),
                items = page.pagination().items,
                "cursor bound"
            );
            self.page = Some(page);
        }

        Ok(())
    }

    /// Item at the current offset.
    pub fn current(&self) -> Result<&Value> {
        self.read().map(|(_, item)| item)
    }

    /// Id of the item at the current offset.
    pub fn key(&self) -> Result<DiscogsId> {
        self.read().map(|(key, _)| key)
    }

    /// Step to the next item. Never fetches; the offset saturates at `per_page`
    /// until [`valid`](Self::valid) turns the page.
    pub fn advance(&mut self) {
        let next = self.offset + 1;
        self.offset = match self.pagination() {
            Some(pagination) => next.min(pagination.per_page as usize),
            None => next,
        };
    }

    /// Continuation check: turn the page if the current one is used up, then
    /// return the item at the offset, or `None` once the result set is exhausted.
    ///
    /// After a page turn the offset restarts at 0 on the new page.
    pub fn valid(&mut self) -> Result<Option<(DiscogsId, &Value)>> {
        let pagination = self.bound_page()?.pagination();

        if self.offset >= pagination.per_page as usize && self.query.page() < pagination.pages {
            let next = self.query.turn_page();
            debug!(
                target: "discogs",
                path = self.query.path(),
                page = next,
                pages = pagination.pages,
                "page boundary reached, fetching next page"
            );
            self.page = Some(self.client.fetch_page(&self.query)?);
            self.offset = 0;
        }

        let page = self.bound_page()?;
        self.extractor.extract(page, self.offset)
    }

    fn bound_page(&self) -> Result<&PageResponse> {
        self.page
            .as_ref()
            .ok_or_else(|| DiscogsError::contract("cursor read before rewind"))
    }

    fn read(&self) -> Result<(DiscogsId, &Value)> {
        let page = self.bound_page()?;
        self.extractor.extract(page, self.offset)?.ok_or_else(|| {
            DiscogsError::contract(format!(
                "no item at offset {} of page {}",
                self.offset,
                page.pagination().page
            ))
        })
    }

    fn step(&mut self) -> Result<Option<(DiscogsId, Value)>> {
        match self.state {
            IterState::Fresh => self.rewind()?,
            IterState::Iterating => self.advance(),
            IterState::Done => return Ok(None),
        }

        let found = self.valid()?;
        Ok(found.map(|(key, item)| (key, item.clone())))
    }
}

impl<E: PageExtractor> Iterator for PagedCursor<E> {
    type Item = Result<(DiscogsId, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(entry)) => {
                self.state = IterState::Iterating;
                Some(Ok(entry))
            }
            Ok(None) => {
                self.state = IterState::Done;
                None
            }
            Err(error) => {
                self.state = IterState::Done;
                Some(Err(error))
            }
        }
    }
}

impl<E: PageExtractor> FusedIterator for PagedCursor<E> {}
