//! Space model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::envelope::{Hydrate, Metadata, Resource};
use crate::error::{CfError, Result};
use crate::models::organization::Organization;
use crate::traits::Get;

/// A Cloud Foundry space.
///
/// Spaces group applications within an organization. When inlined into an
/// app listing, the entity embeds its organization resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Space {
    /// Space guid, promoted from the envelope metadata.
    #[serde(default)]
    pub guid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub organization_guid: String,

    /// Path of the owning organization, used by [`Space::organization`].
    #[serde(default)]
    pub organization_url: Option<String>,

    /// Embedded organization resource, present when inlined.
    #[serde(rename = "organization", default)]
    pub org_data: Option<Resource<Organization>>,

    #[serde(default)]
    pub allow_ssh: bool,

    #[serde(skip)]
    pub(crate) client: Option<CfClient>,
}

impl Space {
    fn attached(&self) -> Result<&CfClient> {
        self.client.as_ref().ok_or(CfError::Detached {
            entity_type: "space",
        })
    }

    /// The embedded organization entity, if the listing inlined it.
    pub fn embedded_organization(&self) -> Option<&Organization> {
        self.org_data.as_ref().map(|resource| &resource.entity)
    }

    /// Fetch the organization this space belongs to.
    pub async fn organization(&self) -> Result<Organization> {
        let client = self.attached()?;
        let path = match self.organization_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "/v2/organizations/{}",
                urlencoding::encode(&self.organization_guid)
            ),
        };

        let response = client.get(&path).await?;
        let resource: Resource<Organization> =
            response.json().await.map_err(CfError::HttpError)?;
        Ok(resource.into_entity(client))
    }
}

impl Hydrate for Space {
    fn hydrate(&mut self, metadata: &Metadata, client: &CfClient) {
        self.guid = metadata.guid.clone();
        if let Some(organization) = &mut self.org_data {
            let Resource { metadata, entity } = organization;
            entity.hydrate(metadata, client);
        }
        self.client = Some(client.clone());
    }
}

#[async_trait]
impl Get for Space {
    type Id = String; // Space guid

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, guid: String) -> Result<Self> {
        let path = format!("/v2/spaces/{}", urlencoding::encode(&guid));

        let response = client.get(&path).await?;
        let resource: Resource<Space> = response.json().await.map_err(CfError::HttpError)?;
        Ok(resource.into_entity(client))
    }
}
