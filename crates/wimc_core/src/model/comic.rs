//! Comic entity.

use crate::model::characters::Characters;
use crate::model::entity::{
    validate_attachment_pair, Entity, EntityId, EntityValidationError, Identified,
};
use crate::model::series::Series;
use serde::{Deserialize, Serialize};

/// One comic issue with an optional cover thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Serialized as `issuenumber` to match the server schema.
    #[serde(rename = "issuenumber", skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64-encoded image bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Characters>,
}

impl Comic {
    /// Builds a reference value carrying only an id and a title.
    pub fn with_id(id: EntityId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl Identified for Comic {
    fn identifier(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Comic {
    const ENTITY_NAME: &'static str = "comic";
    const RESOURCE_PATH: &'static str = "api/comics";

    fn validate(&self) -> Result<(), EntityValidationError> {
        if let Some(issue_number) = self.issue_number {
            if issue_number < 0 {
                return Err(EntityValidationError::NegativeIssueNumber(issue_number));
            }
        }
        validate_attachment_pair(
            "thumbnail",
            self.thumbnail.as_deref(),
            self.thumbnail_content_type.as_deref(),
        )
    }
}
