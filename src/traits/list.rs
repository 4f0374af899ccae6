//! List trait for fetching paginated collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::CfClient;
use crate::envelope::Hydrate;
use crate::error::Result;
use crate::pagination;

/// List entities with cursor pagination.
///
/// Implement this trait for entity types whose collections are paginated
/// by a server-supplied `next_url` cursor. Implementations only declare
/// the path of the first page; the provided methods walk the cursor chain
/// and hydrate every resource.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, App, List};
///
/// let client = CfClient::from_env()?;
///
/// // Fetch the whole collection
/// let apps = App::list_all(&client, &Default::default()).await?;
///
/// // Fetch at most two pages
/// let some = App::list_with_page_bound(&client, &Default::default(), 2).await?;
/// ```
#[async_trait]
pub trait List: Hydrate + DeserializeOwned + Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// Path of the first page, query string included.
    fn list_path(query: &Self::Query) -> String;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Follows the `next_url` cursor chain until the server reports no
    /// further pages, preserving page and cross-page order.
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `query` - Query parameters for filtering
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails; no partial result is
    /// returned.
    async fn list_all(client: &CfClient, query: &Self::Query) -> Result<Vec<Self>> {
        pagination::fetch_all(client, &Self::list_path(query), 0).await
    }

    /// List entities matching the query, fetching at most `page_bound`
    /// pages.
    ///
    /// A positive bound stops after that many pages with a partial (but
    /// non-error) result. Zero or a negative bound means no bound.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_with_page_bound(
        client: &CfClient,
        query: &Self::Query,
        page_bound: i32,
    ) -> Result<Vec<Self>> {
        pagination::fetch_all(client, &Self::list_path(query), page_bound).await
    }
}
