//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (typically a guid). Implementations decode the
/// metadata/entity envelope and return the hydrated entity, so the result
/// always carries its promoted identity and a usable client
/// back-reference.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, App, Get};
///
/// let client = CfClient::from_env()?;
/// let app = App::get(&client, "9d4c8f45-2c83-47a5-bb88-123d5d67e2f1".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., String guid).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &CfClient, id: Self::Id) -> Result<Self>;
}
