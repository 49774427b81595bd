// SPDX-License-Identifier: GPL-3.0-or-later

//! Item extraction for the paged resource shapes the cursor understands.

use crate::decode::PageResponse;
use crate::error::{DiscogsError, Result};
use crate::models::DiscogsId;
use serde_json::Value;
use std::fmt::Debug;

/// Maps a page and a zero-based index to the keyed item at that index.
///
/// Implementations differ only in where the items live inside a page
/// document; keys are always the item's numeric `id`.
pub trait PageExtractor: Debug {
    /// Name of the array holding the items in each page document.
    const ITEMS_FIELD: &'static str;

    /// The item at `index`, or `None` when the page has no such index.
    ///
    /// A page holding more items than its `per_page` is rejected. An empty
    /// result set may omit the items array altogether.
    fn extract<'a>(
        &self,
        page: &'a PageResponse,
        index: usize,
    ) -> Result<Option<(DiscogsId, &'a Value)>> {
        let pagination = page.pagination();
        let items = match page.document().get(Self::ITEMS_FIELD).and_then(Value::as_array) {
            Some(items) => items,
            None if pagination.items == 0 => return Ok(None),
            None => return Err(DiscogsError::MissingField(Self::ITEMS_FIELD)),
        };

        if items.len() > pagination.per_page as usize {
            return Err(DiscogsError::contract(format!(
                "page {} holds {} {}, more than per_page {}",
                pagination.page,
                items.len(),
                Self::ITEMS_FIELD,
                pagination.per_page
            )));
        }

        match items.get(index) {
            Some(item) => Ok(Some((item_key(item)?, item))),
            None => Ok(None),
        }
    }
}

/// `results` of `database/search`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResults;

impl PageExtractor for SearchResults {
    const ITEMS_FIELD: &'static str = "results";
}

/// `releases` of `artists/{id}/releases`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistReleases;

impl PageExtractor for ArtistReleases {
    const ITEMS_FIELD: &'static str = "releases";
}

fn item_key(item: &Value) -> Result<DiscogsId> {
    let id = item
        .get("id")
        .ok_or_else(|| DiscogsError::contract(format!("item has no id: {item}")))?;

    let numeric: Option<u64> = match id {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    numeric
        .map(DiscogsId)
        .ok_or_else(|| DiscogsError::contract(format!("item id is not numeric: {id}")))
}
