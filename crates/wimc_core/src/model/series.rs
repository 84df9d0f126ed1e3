//! Series entity.

use crate::model::characters::Characters;
use crate::model::comic::Comic;
use crate::model::entity::{Entity, EntityId, Identified};
use serde::{Deserialize, Serialize};

/// A run of comics, optionally linked to one characters record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inverse side of `Comic::series`; display only, never edited here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comics: Option<Vec<Comic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Characters>,
}

impl Series {
    /// Builds a reference value carrying only an id and a name.
    pub fn with_id(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Identified for Series {
    fn identifier(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Series {
    const ENTITY_NAME: &'static str = "series";
    const RESOURCE_PATH: &'static str = "api/series";
}
