//! Route model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::envelope::{Hydrate, Metadata, Resource};
use crate::error::{CfError, Result};
use crate::models::app::{list_apps_for_route, App};
use crate::traits::{Create, List};

/// A Cloud Foundry route.
///
/// Routes only promote their guid from the envelope metadata; the v2 API
/// does not expose audit timestamps on the route entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    /// Route guid, promoted from the envelope metadata.
    #[serde(default)]
    pub guid: String,

    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub domain_guid: String,

    #[serde(default)]
    pub space_guid: String,

    #[serde(default)]
    pub service_instance_guid: Option<String>,

    /// Port, set for TCP routes.
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(skip)]
    pub(crate) client: Option<CfClient>,
}

impl Route {
    fn attached(&self) -> Result<&CfClient> {
        self.client.as_ref().ok_or(CfError::Detached {
            entity_type: "route",
        })
    }

    /// Fetch the applications bound to this route.
    pub async fn apps(&self) -> Result<Vec<App>> {
        list_apps_for_route(self.attached()?, &self.guid).await
    }

    /// Create a TCP route, letting the platform pick the port.
    pub async fn create_tcp(client: &CfClient, request: RouteRequest) -> Result<Route> {
        create_route(client, "/v2/routes?generate_port=true", &request).await
    }
}

impl Hydrate for Route {
    fn hydrate(&mut self, metadata: &Metadata, client: &CfClient) {
        self.guid = metadata.guid.clone();
        self.client = Some(client.clone());
    }
}

/// Parameters for creating a route.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteRequest {
    pub domain_guid: String,
    pub space_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Parameters for binding a route to an application.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMappingRequest {
    pub app_guid: String,
    pub route_guid: String,
}

/// Entity payload of a route mapping resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteMapping {
    #[serde(default)]
    pub app_port: Option<u16>,
}

/// Query parameters for listing routes.
#[derive(Debug, Clone, Default)]
pub struct RouteListQuery {
    /// `q` filter expressions, e.g. `host:my-app`.
    pub q: Vec<String>,
}

impl RouteListQuery {
    /// Add a `q` filter expression.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.q.push(expression.into());
        self
    }

    fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for filter in &self.q {
            serializer.append_pair("q", filter);
        }
        serializer.finish()
    }
}

#[async_trait]
impl List for Route {
    type Query = RouteListQuery;

    fn list_path(query: &Self::Query) -> String {
        let query_string = query.query_string();
        if query_string.is_empty() {
            "/v2/routes".to_string()
        } else {
            format!("/v2/routes?{query_string}")
        }
    }
}

#[async_trait]
impl Create for Route {
    type Params = RouteRequest;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &CfClient, params: Self::Params) -> Result<Self> {
        create_route(client, "/v2/routes", &params).await
    }
}

async fn create_route(client: &CfClient, path: &str, request: &RouteRequest) -> Result<Route> {
    let response = client.post(path, request).await?;
    let resource: Resource<Route> = response.json().await.map_err(CfError::HttpError)?;
    Ok(resource.into_entity(client))
}

/// Bind a route to an application.
///
/// Returns the mapping resource as decoded; its metadata carries the
/// mapping guid.
pub async fn map_route(
    client: &CfClient,
    mapping: &RouteMappingRequest,
) -> Result<Resource<RouteMapping>> {
    let response = client.post("/v2/route_mappings", mapping).await?;
    response.json().await.map_err(CfError::HttpError)
}
