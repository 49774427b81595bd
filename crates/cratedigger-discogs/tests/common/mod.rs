//! Shared fixtures for the wiremock-backed tests.
//!
//! The client is blocking, so each test runs the mock server on the tokio
//! runtime and drives the client on a blocking thread via [`run_blocking`].

#![allow(dead_code)]

use cratedigger_discogs::DiscogsClient;
use serde_json::{json, Value};

pub const USER_AGENT: &str = "CratediggerTests/0.1 +https://tests.cratedigger.example";

pub fn client_for(uri: &str) -> DiscogsClient {
    DiscogsClient::builder()
        .base_url(uri)
        .user_agent(USER_AGENT)
        .build()
        .expect("client builds")
}

/// A `database/search` page with one minimal release per id.
pub fn search_page(page: u32, pages: u32, per_page: u32, items: u64, ids: &[u64]) -> Value {
    let results: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "type": "release",
                "title": format!("Release {id}"),
                "resource_url": format!("https://api.discogs.com/releases/{id}")
            })
        })
        .collect();

    json!({
        "pagination": {
            "page": page,
            "pages": pages,
            "per_page": per_page,
            "items": items,
            "urls": {}
        },
        "results": results
    })
}

pub async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}
