//! Wire envelope shared by all v2 resources.
//!
//! Every collection item pairs a `metadata` section (identity, audit
//! timestamps, canonical URL) with an `entity` section holding the domain
//! fields. The entity payload does not carry its own identity; it is
//! promoted from the metadata after decoding.

use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::timestamp::FlexibleTime;

/// Identity and audit metadata attached to every resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<FlexibleTime>,
    #[serde(default)]
    pub updated_at: Option<FlexibleTime>,
}

/// One collection item: metadata wrapped around an entity payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<T> {
    pub metadata: Metadata,
    pub entity: T,
}

impl<T: Hydrate> Resource<T> {
    /// Promote the metadata onto the entity and hand it the owning client.
    pub fn into_entity(self, client: &CfClient) -> T {
        let Resource {
            metadata,
            mut entity,
        } = self;
        entity.hydrate(&metadata, client);
        entity
    }
}

/// Per-kind rule for copying envelope metadata onto a decoded entity.
///
/// Which fields are promoted is declared by each entity kind rather than
/// inferred: routes take only the guid, apps take the guid and both audit
/// timestamps. Implementations also recurse into any embedded resources,
/// so hydration of the root covers every nested envelope in the response,
/// and attach the client as a back-reference for follow-up fetches. The
/// back-reference is never serialized and plays no part in equality.
pub trait Hydrate {
    fn hydrate(&mut self, metadata: &Metadata, client: &CfClient);
}
