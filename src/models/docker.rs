//! v3 Docker staging flow.
//!
//! Staging a Docker image is a chain of one-shot v3 calls: create the app
//! shell, create a package pointing at the image, create a build for the
//! package, poll the build until it produces a droplet, assign the
//! droplet, then start the app. The v3 endpoints return flat objects
//! rather than metadata/entity envelopes, and their timestamps are plain
//! RFC 3339.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::error::{CfError, Result};

#[derive(Debug, Serialize)]
struct DockerAppRequest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment_variables: Option<HashMap<String, String>>,
    relationships: SpaceRelationship,
    lifecycle: DockerLifecycle,
}

impl DockerAppRequest {
    fn new(name: &str, space_guid: &str) -> Self {
        Self {
            name: name.to_string(),
            environment_variables: None,
            relationships: SpaceRelationship {
                space: Relationship {
                    data: RelationshipData {
                        guid: space_guid.to_string(),
                    },
                },
            },
            lifecycle: DockerLifecycle {
                kind: "docker",
                data: Empty {},
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SpaceRelationship {
    space: Relationship,
}

#[derive(Debug, Serialize)]
struct AppRelationship {
    app: Relationship,
}

#[derive(Debug, Serialize)]
struct Relationship {
    data: RelationshipData,
}

#[derive(Debug, Serialize)]
struct RelationshipData {
    guid: String,
}

#[derive(Debug, Serialize)]
struct DockerLifecycle {
    #[serde(rename = "type")]
    kind: &'static str,
    data: Empty,
}

#[derive(Debug, Serialize)]
struct Empty {}

#[derive(Debug, Serialize)]
struct DockerPackageRequest {
    #[serde(rename = "type")]
    kind: &'static str,
    relationships: AppRelationship,
    data: DockerPackageData,
}

#[derive(Debug, Serialize)]
struct DockerPackageData {
    image: String,
}

#[derive(Debug, Serialize)]
struct DockerBuildRequest {
    package: PackageRef,
}

#[derive(Debug, Serialize)]
struct PackageRef {
    guid: String,
}

#[derive(Debug, Serialize)]
struct DropletRequest {
    data: DropletData,
}

#[derive(Debug, Serialize)]
struct DropletData {
    guid: String,
}

/// A v3 application object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerAppResponse {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

/// A v3 package object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerPackageResponse {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A v3 build object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerBuildResponse {
    #[serde(default)]
    pub guid: String,
    /// Build state, `STAGING`, `STAGED`, or `FAILED`.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// The droplet produced by a staged build.
    #[serde(default)]
    pub droplet: Option<DropletRef>,
}

/// Reference to a droplet produced by a build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropletRef {
    #[serde(default)]
    pub guid: String,
}

/// Create a Docker-lifecycle application in a space.
pub async fn create_docker_app(
    client: &CfClient,
    name: &str,
    space_guid: &str,
) -> Result<DockerAppResponse> {
    let request = DockerAppRequest::new(name, space_guid);
    let response = client.post("/v3/apps", &request).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Create a Docker-lifecycle application with environment variables.
pub async fn create_docker_app_with_env(
    client: &CfClient,
    name: &str,
    space_guid: &str,
    vars: HashMap<String, String>,
) -> Result<DockerAppResponse> {
    let mut request = DockerAppRequest::new(name, space_guid);
    request.environment_variables = Some(vars);
    let response = client.post("/v3/apps", &request).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Create the package pointing an application at a Docker image.
///
/// The package then needs a build associated via [`create_docker_build`].
pub async fn create_docker_package(
    client: &CfClient,
    app_guid: &str,
    image: &str,
) -> Result<DockerPackageResponse> {
    let request = DockerPackageRequest {
        kind: "docker",
        relationships: AppRelationship {
            app: Relationship {
                data: RelationshipData {
                    guid: app_guid.to_string(),
                },
            },
        },
        data: DockerPackageData {
            image: image.to_string(),
        },
    };
    let response = client.post("/v3/packages", &request).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Create a build to stage an existing package.
pub async fn create_docker_build(
    client: &CfClient,
    package_guid: &str,
) -> Result<DockerBuildResponse> {
    let request = DockerBuildRequest {
        package: PackageRef {
            guid: package_guid.to_string(),
        },
    };
    let response = client.post("/v3/builds", &request).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Fetch a build, typically to check whether staging has produced a
/// droplet yet.
pub async fn get_build_info(client: &CfClient, build_guid: &str) -> Result<DockerBuildResponse> {
    let path = format!("/v3/builds/{}", urlencoding::encode(build_guid));
    let response = client.get(&path).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Assign a staged droplet as an application's current droplet.
pub async fn assign_droplet(
    client: &CfClient,
    app_guid: &str,
    droplet_guid: &str,
) -> Result<DockerAppResponse> {
    let request = DropletRequest {
        data: DropletData {
            guid: droplet_guid.to_string(),
        },
    };
    let path = format!(
        "/v3/apps/{}/relationships/current_droplet",
        urlencoding::encode(app_guid)
    );
    let response = client.patch(&path, &request).await?;
    response.json().await.map_err(CfError::HttpError)
}

/// Start an application.
pub async fn start_app(client: &CfClient, app_guid: &str) -> Result<DockerAppResponse> {
    let path = format!("/v3/apps/{}/actions/start", urlencoding::encode(app_guid));
    let response = client.post_empty(&path).await?;
    response.json().await.map_err(CfError::HttpError)
}
