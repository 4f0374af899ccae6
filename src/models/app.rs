//! Application model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::envelope::{Hydrate, Metadata, Resource};
use crate::error::{CfError, Result};
use crate::models::route::Route;
use crate::models::space::Space;
use crate::pagination;
use crate::timestamp::{EpochSeconds, FlexibleTime};
use crate::traits::{Get, List};

/// A Cloud Foundry application.
///
/// The guid and audit timestamps live in the envelope metadata on the
/// wire and are promoted onto the entity during hydration. When listed
/// with `inline-relations-depth=2`, the entity embeds its space resource,
/// which in turn embeds the owning organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct App {
    /// Application guid, promoted from the envelope metadata.
    #[serde(default)]
    pub guid: String,

    /// Creation time, promoted from the envelope metadata.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time, promoted from the envelope metadata.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub name: String,

    /// Memory limit in megabytes.
    #[serde(default)]
    pub memory: i64,

    /// Desired instance count.
    #[serde(default)]
    pub instances: i32,

    /// Disk limit in megabytes.
    #[serde(default)]
    pub disk_quota: i64,

    #[serde(default)]
    pub space_guid: String,

    #[serde(default)]
    pub stack_guid: String,

    /// Requested state, `STARTED` or `STOPPED`.
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub package_state: String,

    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub buildpack: Option<String>,

    #[serde(default)]
    pub detected_buildpack: Option<String>,

    #[serde(default)]
    pub detected_buildpack_guid: Option<String>,

    #[serde(default)]
    pub health_check_http_endpoint: Option<String>,

    #[serde(default)]
    pub health_check_type: Option<String>,

    #[serde(default)]
    pub health_check_timeout: Option<i64>,

    #[serde(default)]
    pub diego: bool,

    #[serde(default)]
    pub enable_ssh: bool,

    #[serde(default)]
    pub detected_start_command: Option<String>,

    #[serde(default)]
    pub docker_image: Option<String>,

    #[serde(rename = "docker_credentials_json", default)]
    pub docker_credentials: Option<HashMap<String, serde_json::Value>>,

    #[serde(rename = "environment_json", default)]
    pub environment: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub staging_failed_reason: Option<String>,

    #[serde(default)]
    pub staging_failed_description: Option<String>,

    #[serde(default)]
    pub ports: Option<Vec<u16>>,

    /// Path of the owning space, used by [`App::space`].
    #[serde(default)]
    pub space_url: Option<String>,

    /// Embedded space resource, present when listed with
    /// `inline-relations-depth` >= 1.
    #[serde(rename = "space", default)]
    pub space_data: Option<Resource<Space>>,

    #[serde(default)]
    pub package_updated_at: Option<FlexibleTime>,

    #[serde(skip)]
    pub(crate) client: Option<CfClient>,
}

impl App {
    fn attached(&self) -> Result<&CfClient> {
        self.client
            .as_ref()
            .ok_or(CfError::Detached { entity_type: "app" })
    }

    /// The embedded space entity, if the listing inlined it.
    pub fn embedded_space(&self) -> Option<&Space> {
        self.space_data.as_ref().map(|resource| &resource.entity)
    }

    /// Fetch the space this application belongs to.
    ///
    /// Uses the client attached during hydration and the `space_url`
    /// reported by the API, falling back to the space guid.
    pub async fn space(&self) -> Result<Space> {
        let client = self.attached()?;
        let path = match self.space_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("/v2/spaces/{}", urlencoding::encode(&self.space_guid)),
        };

        let response = client.get(&path).await?;
        let resource: Resource<Space> = response.json().await.map_err(CfError::HttpError)?;
        Ok(resource.into_entity(client))
    }

    /// Fetch the routes mapped to this application.
    pub async fn routes(&self) -> Result<Vec<Route>> {
        get_app_routes(self.attached()?, &self.guid).await
    }

    /// Look up a single application by name within a space and org.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::NotFound`] if no application matches.
    pub async fn by_name(
        client: &CfClient,
        name: &str,
        space_guid: &str,
        org_guid: &str,
    ) -> Result<App> {
        let query = AppListQuery::default()
            .filter(format!("organization_guid:{org_guid}"))
            .filter(format!("space_guid:{space_guid}"))
            .filter(format!("name:{name}"));

        let mut apps = Self::list_all(client, &query).await?;
        if apps.is_empty() {
            return Err(CfError::NotFound {
                entity_type: "app",
                id: name.to_string(),
            });
        }
        Ok(apps.remove(0))
    }
}

impl Hydrate for App {
    fn hydrate(&mut self, metadata: &Metadata, client: &CfClient) {
        self.guid = metadata.guid.clone();
        self.created_at = metadata.created_at.map(Into::into);
        self.updated_at = metadata.updated_at.map(Into::into);
        if let Some(space) = &mut self.space_data {
            let Resource { metadata, entity } = space;
            entity.hydrate(metadata, client);
        }
        self.client = Some(client.clone());
    }
}

/// Query parameters for listing applications.
#[derive(Debug, Clone, Default)]
pub struct AppListQuery {
    /// `q` filter expressions, e.g. `name:my-app` or `space_guid:...`.
    pub q: Vec<String>,
    /// How deep to inline related resources.
    pub inline_relations_depth: Option<u32>,
}

impl AppListQuery {
    /// Add a `q` filter expression.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.q.push(expression.into());
        self
    }

    /// Set the inline relations depth.
    #[must_use]
    pub fn inline_relations_depth(mut self, depth: u32) -> Self {
        self.inline_relations_depth = Some(depth);
        self
    }

    fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for filter in &self.q {
            serializer.append_pair("q", filter);
        }
        if let Some(depth) = self.inline_relations_depth {
            serializer.append_pair("inline-relations-depth", &depth.to_string());
        }
        serializer.finish()
    }
}

#[async_trait]
impl Get for App {
    type Id = String; // Application guid

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, guid: String) -> Result<Self> {
        let path = format!(
            "/v2/apps/{}?inline-relations-depth=2",
            urlencoding::encode(&guid)
        );

        let response = client.get(&path).await?;
        let resource: Resource<App> = response.json().await.map_err(CfError::HttpError)?;
        Ok(resource.into_entity(client))
    }
}

#[async_trait]
impl List for App {
    type Query = AppListQuery;

    fn list_path(query: &Self::Query) -> String {
        let query_string = query.query_string();
        if query_string.is_empty() {
            "/v2/apps".to_string()
        } else {
            format!("/v2/apps?{query_string}")
        }
    }
}

/// One running (or crashed) instance of an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInstance {
    pub state: String,
    /// When the instance entered its current state, wire-encoded as epoch
    /// seconds.
    pub since: EpochSeconds,
}

/// Resource usage statistics for one application instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStats {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub stats: AppStatsDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStatsDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uris: Vec<String>,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub uptime: i64,
    #[serde(default)]
    pub mem_quota: i64,
    #[serde(default)]
    pub disk_quota: i64,
    #[serde(default)]
    pub fds_quota: i64,
    #[serde(default)]
    pub usage: AppUsage,
}

/// Point-in-time usage sample for one instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppUsage {
    /// Sample time, wire-encoded as a free-form date string whose format
    /// varies across API versions.
    #[serde(default)]
    pub time: Option<FlexibleTime>,
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub mem: i64,
    #[serde(default)]
    pub disk: i64,
}

/// Environment variable groups for an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppEnv {
    // These can carry arbitrary JSON values.
    #[serde(rename = "environment_json", default)]
    pub environment: HashMap<String, serde_json::Value>,
    #[serde(rename = "staging_env_json", default)]
    pub staging_env: HashMap<String, serde_json::Value>,
    #[serde(rename = "running_env_json", default)]
    pub running_env: HashMap<String, serde_json::Value>,
    #[serde(rename = "system_env_json", default)]
    pub system_env: HashMap<String, serde_json::Value>,
    #[serde(rename = "application_env_json", default)]
    pub application_env: HashMap<String, serde_json::Value>,
}

/// List all applications, inlining spaces and organizations.
pub async fn list_apps(client: &CfClient) -> Result<Vec<App>> {
    let query = AppListQuery::default().inline_relations_depth(2);
    App::list_all(client, &query).await
}

/// List the applications bound to a route.
pub async fn list_apps_for_route(client: &CfClient, route_guid: &str) -> Result<Vec<App>> {
    let path = format!("/v2/routes/{}/apps", urlencoding::encode(route_guid));
    pagination::fetch_all(client, &path, 0).await
}

/// Fetch the routes mapped to an application.
pub async fn get_app_routes(client: &CfClient, guid: &str) -> Result<Vec<Route>> {
    let path = format!("/v2/apps/{}/routes", urlencoding::encode(guid));
    pagination::fetch_all(client, &path, 0).await
}

/// Fetch the instance states of an application, keyed by instance index.
pub async fn get_app_instances(
    client: &CfClient,
    guid: &str,
) -> Result<HashMap<String, AppInstance>> {
    let path = format!("/v2/apps/{}/instances", urlencoding::encode(guid));
    let response = client.get(&path).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Fetch the environment variable groups of an application.
pub async fn get_app_env(client: &CfClient, guid: &str) -> Result<AppEnv> {
    let path = format!("/v2/apps/{}/env", urlencoding::encode(guid));
    let response = client.get(&path).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Fetch usage statistics for an application, keyed by instance index.
pub async fn get_app_stats(client: &CfClient, guid: &str) -> Result<HashMap<String, AppStats>> {
    let path = format!("/v2/apps/{}/stats", urlencoding::encode(guid));
    let response = client.get(&path).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Terminate a single application instance by index.
pub async fn kill_app_instance(client: &CfClient, guid: &str, index: u32) -> Result<()> {
    let path = format!("/v2/apps/{}/instances/{index}", urlencoding::encode(guid));
    client.delete(&path).await?;
    Ok(())
}
