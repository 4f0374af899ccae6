//! Cursor-walking collection fetch.
//!
//! v2 collections are paginated by an opaque `next_url` cursor: each page
//! response names the path of the next page, and an empty cursor is the
//! only termination signal. Pages are therefore fetched strictly
//! sequentially, hydrating every resource into the accumulator as it
//! arrives.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::client::CfClient;
use crate::envelope::{Hydrate, Resource};
use crate::error::{CfError, Result};

/// One page of a v2 collection response.
///
/// Constructed fresh per HTTP response and discarded once its resources
/// are merged into the accumulator. `total_results` and `total_pages` are
/// informational only; a collection can shrink or grow between page
/// fetches, so termination is decided solely by `next_url`.
#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Path of the next page; empty on the last page. The server sends
    /// either `null` or an empty string, both mean the chain is done.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub next_url: String,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<T>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decision after a page's resources have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    /// Follow the cursor to the next page.
    Next(String),
    /// The server reported no further pages.
    Exhausted,
    /// The caller's page bound was reached before the chain ended.
    BoundReached,
}

/// Termination rule for the pagination walk.
///
/// An empty cursor always ends the walk, regardless of any bound. A
/// positive `page_bound` ends it once that many pages have been fetched;
/// zero or a negative bound never does.
fn advance(next_url: &str, pages_fetched: u32, page_bound: i32) -> Step {
    if next_url.is_empty() {
        return Step::Exhausted;
    }
    if page_bound > 0 && pages_fetched >= page_bound as u32 {
        return Step::BoundReached;
    }
    Step::Next(next_url.to_string())
}

/// Fetch and decode a single page.
pub(crate) async fn fetch_page<T>(
    client: &CfClient,
    path: &str,
    page_index: u32,
) -> Result<PageResponse<T>>
where
    T: DeserializeOwned,
{
    let response = client.get(path).await?;
    let body = response.text().await.map_err(CfError::HttpError)?;
    serde_json::from_str(&body).map_err(|source| CfError::Decode {
        url: path.to_string(),
        page: page_index,
        source,
    })
}

/// Walk a paginated collection from `start_path`, hydrating every
/// resource in page order.
///
/// A positive `page_bound` stops after that many pages with a partial
/// result; zero or a negative bound walks the chain until the server
/// reports no next page. Any transport, status, or decode failure aborts
/// the whole fetch; no partial result is returned alongside an error.
pub(crate) async fn fetch_all<T>(
    client: &CfClient,
    start_path: &str,
    page_bound: i32,
) -> Result<Vec<T>>
where
    T: DeserializeOwned + Hydrate + Send,
{
    let mut collected = Vec::new();
    let mut request_path = start_path.to_string();
    let mut pages_fetched: u32 = 0;

    loop {
        let page = fetch_page::<T>(client, &request_path, pages_fetched).await?;
        pages_fetched += 1;

        tracing::debug!(
            path = %request_path,
            page = pages_fetched,
            resources = page.resources.len(),
            "fetched collection page"
        );

        let next_url = page.next_url;
        collected.reserve(page.resources.len());
        for resource in page.resources {
            collected.push(resource.into_entity(client));
        }

        match advance(&next_url, pages_fetched, page_bound) {
            Step::Next(next) => request_path = next,
            Step::Exhausted | Step::BoundReached => break,
        }
    }

    Ok(collected)
}
