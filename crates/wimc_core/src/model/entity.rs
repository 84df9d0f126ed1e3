//! Shared entity contracts.
//!
//! # Responsibility
//! - Define the identifier accessor every entity exposes.
//! - Describe the remote resource an entity type lives under.
//! - Define write-path validation errors shared by all entity types.
//!
//! # Invariants
//! - `id == None` means the entity has never been persisted.
//! - Two entities are the same iff both ids are `Some` and equal.
//! - Attachment content and content type are set together or not at all.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Server-assigned identifier, unique within one entity type.
pub type EntityId = i64;

/// Identifier accessor used by collection merging.
pub trait Identified {
    fn identifier(&self) -> Option<EntityId>;
}

/// Entity shape persisted through one REST resource.
///
/// `Default` must produce the empty "new entity" value used by create views.
pub trait Entity:
    Identified
    + Clone
    + Debug
    + Default
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Lowercase singular name used in logs and error messages.
    const ENTITY_NAME: &'static str;
    /// Resource path relative to the API base URL, e.g. `api/comics`.
    const RESOURCE_PATH: &'static str;

    /// Checks client-side invariants before a write leaves the process.
    fn validate(&self) -> Result<(), EntityValidationError> {
        Ok(())
    }
}

/// Write-path validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// Attachment bytes are present but their content type is not.
    AttachmentWithoutContentType { field: &'static str },
    /// A content type is present without attachment bytes.
    ContentTypeWithoutAttachment { field: &'static str },
    /// Comic issue numbers start at zero.
    NegativeIssueNumber(i32),
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttachmentWithoutContentType { field } => {
                write!(f, "`{field}` is set without a content type")
            }
            Self::ContentTypeWithoutAttachment { field } => {
                write!(f, "`{field}` has a content type but no content")
            }
            Self::NegativeIssueNumber(value) => {
                write!(f, "issue number must be >= 0, got {value}")
            }
        }
    }
}

impl Error for EntityValidationError {}

/// Validates the paired attachment invariant for one field.
pub(crate) fn validate_attachment_pair(
    field: &'static str,
    data: Option<&str>,
    content_type: Option<&str>,
) -> Result<(), EntityValidationError> {
    let has_data = data.is_some_and(|value| !value.is_empty());
    let has_type = content_type.is_some_and(|value| !value.is_empty());
    match (has_data, has_type) {
        (true, false) => Err(EntityValidationError::AttachmentWithoutContentType { field }),
        (false, true) => Err(EntityValidationError::ContentTypeWithoutAttachment { field }),
        _ => Ok(()),
    }
}
