// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only client for the public Discogs database API (v2).
//!
//! The client issues blocking GET requests, decodes JSON documents and walks
//! paginated list endpoints lazily through [`PagedCursor`]: a new page is only
//! requested once every item of the current one has been consumed.
//!
//! ```no_run
//! # use cratedigger_discogs::DiscogsClient;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DiscogsClient::new("MyPersonalClient/0.1 +http://mypersonalclient.com")?;
//! for entry in client.search_releases("Zappa") {
//!     let (id, release) = entry?;
//!     println!("{id}: {}", release["title"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod identity;
pub mod models;
pub mod rate_limit;

pub use client::{DiscogsClient, DiscogsClientBuilder};
pub use cursor::{PageQuery, PagedCursor};
pub use decode::{PageResponse, Pagination};
pub use error::{DiscogsError, RateLimitError, Result};
pub use extract::{ArtistReleases, PageExtractor, SearchResults};
pub use identity::UserAgent;
pub use models::{DiscogsId, RawImage, SearchRequest};
