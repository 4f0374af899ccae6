//! Create trait for provisioning entities.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Create a new entity.
///
/// Implement this trait for entity types that can be provisioned through
/// the API. The returned entity is hydrated from the response envelope.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Create, Route, RouteRequest};
///
/// let client = CfClient::from_env()?;
/// let route = Route::create(
///     &client,
///     RouteRequest {
///         domain_guid: "domain-guid".to_string(),
///         space_guid: "space-guid".to_string(),
///         host: Some("my-app".to_string()),
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the creation request.
    type Params;

    /// Create the entity and return the hydrated result.
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `params` - Creation parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn create(client: &CfClient, params: Self::Params) -> Result<Self>;
}
