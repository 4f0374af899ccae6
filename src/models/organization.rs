//! Organization model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::envelope::{Hydrate, Metadata, Resource};
use crate::error::{CfError, Result};
use crate::traits::Get;

/// A Cloud Foundry organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    /// Organization guid, promoted from the envelope metadata.
    #[serde(default)]
    pub guid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub quota_definition_guid: Option<String>,

    #[serde(skip)]
    pub(crate) client: Option<CfClient>,
}

impl Hydrate for Organization {
    fn hydrate(&mut self, metadata: &Metadata, client: &CfClient) {
        self.guid = metadata.guid.clone();
        self.client = Some(client.clone());
    }
}

#[async_trait]
impl Get for Organization {
    type Id = String; // Organization guid

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, guid: String) -> Result<Self> {
        let path = format!("/v2/organizations/{}", urlencoding::encode(&guid));

        let response = client.get(&path).await?;
        let resource: Resource<Organization> =
            response.json().await.map_err(CfError::HttpError)?;
        Ok(resource.into_entity(client))
    }
}
