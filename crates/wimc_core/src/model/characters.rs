//! Characters entity.

use crate::model::comic::Comic;
use crate::model::entity::{
    validate_attachment_pair, Entity, EntityId, EntityValidationError, Identified,
};
use crate::model::series::Series;
use serde::{Deserialize, Serialize};

/// A character (or team) appearing across series and comics.
///
/// `series` and `comics` are inverse sides owned by the other entities and
/// only carried for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Characters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64-encoded image bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<Series>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comics: Option<Vec<Comic>>,
}

impl Characters {
    /// Builds a reference value carrying only an id and a name.
    pub fn with_id(id: EntityId, full_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            full_name: Some(full_name.into()),
            ..Self::default()
        }
    }
}

impl Identified for Characters {
    fn identifier(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Characters {
    const ENTITY_NAME: &'static str = "characters";
    const RESOURCE_PATH: &'static str = "api/characters";

    fn validate(&self) -> Result<(), EntityValidationError> {
        validate_attachment_pair(
            "thumbnail",
            self.thumbnail.as_deref(),
            self.thumbnail_content_type.as_deref(),
        )
    }
}
