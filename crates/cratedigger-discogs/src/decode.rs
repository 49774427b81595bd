// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{DiscogsError, Result};
use serde::Serialize;
use serde_json::Value;

/// Pagination envelope of a Discogs list endpoint.
///
/// Discogs names these `page`, `pages`, `per_page` and `items`; `pages` and
/// `items` are the totals for the whole result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub items: u64,
}

/// One decoded page of a list endpoint: the whole document plus its validated
/// pagination envelope. Items stay inside the document; extraction is up to a
/// [`PageExtractor`](crate::extract::PageExtractor).
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    document: Value,
    pagination: Pagination,
}

impl PageResponse {
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }
}

/// Decode a single JSON document (lookups, no pagination envelope).
///
/// An object carrying nothing but a `message` string is how Discogs reports
/// errors in a 2xx body; a `message` next to other fields is ordinary data.
pub fn decode_document(body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body)?;

    if let Some(object) = value.as_object().filter(|object| object.len() == 1) {
        if let Some(message) = object.get("message").and_then(Value::as_str) {
            return Err(DiscogsError::Api {
                message: message.to_string(),
            });
        }
    }

    Ok(value)
}

/// Decode one page of a list endpoint. Every pagination counter must be
/// present and numeric.
pub fn decode_page(body: &[u8]) -> Result<PageResponse> {
    let document = decode_document(body)?;

    let envelope = document
        .get("pagination")
        .filter(|envelope| envelope.is_object())
        .ok_or(DiscogsError::MissingField("pagination"))?;

    let pagination = Pagination {
        page: counter(envelope, "page")?,
        pages: counter(envelope, "pages")?,
        per_page: counter(envelope, "per_page")?,
        items: counter(envelope, "items")?,
    };

    if pagination.page == 0 {
        return Err(DiscogsError::contract("pagination.page is 1-based, got 0"));
    }
    if pagination.per_page == 0 && pagination.items > 0 {
        return Err(DiscogsError::contract(format!(
            "pagination.per_page is 0 for {} items",
            pagination.items
        )));
    }
    if pagination.page > pagination.pages && pagination.items > 0 {
        return Err(DiscogsError::contract(format!(
            "pagination.page {} is past pagination.pages {}",
            pagination.page, pagination.pages
        )));
    }

    Ok(PageResponse {
        document,
        pagination,
    })
}

/// Read a non-negative integer counter, accepting numeric strings as well.
fn counter<T: TryFrom<u64>>(envelope: &Value, name: &str) -> Result<T> {
    let value = envelope
        .get(name)
        .ok_or_else(|| DiscogsError::contract(format!("pagination.{name} is missing")))?;

    let number = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| DiscogsError::contract(format!("pagination.{name} is not numeric: {value}")))?;

    T::try_from(number).map_err(|_| {
        DiscogsError::contract(format!("pagination.{name} is out of range: {number}"))
    })
}
