//! Entity <-> edit form mapping.
//!
//! # Responsibility
//! - Copy an entity into editable form state field by field.
//! - Rebuild an entity from form state on top of a default entity.
//!
//! # Invariants
//! - Relationship fields are copied as whole nested entities so option
//!   matching by identifier keeps working.
//! - `extract` never carries fields the form does not track; those come
//!   from `Entity::default()`.
//! - Attachment pairs move together.

use crate::model::characters::Characters;
use crate::model::comic::Comic;
use crate::model::entity::{Entity, EntityId};
use crate::model::series::Series;
use crate::service::attachment::AttachmentField;

/// Editable state bound to one entity type.
pub trait EntityForm: Default {
    type Entity: Entity;

    fn populate(&mut self, entity: &Self::Entity);
    fn extract(&self) -> Self::Entity;

    fn from_entity(entity: &Self::Entity) -> Self {
        let mut form = Self::default();
        form.populate(entity);
        form
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesForm {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub characters: Option<Characters>,
}

impl EntityForm for SeriesForm {
    type Entity = Series;

    fn populate(&mut self, series: &Series) {
        self.id = series.id;
        self.name = series.name.clone();
        self.characters = series.characters.clone();
    }

    fn extract(&self) -> Series {
        Series {
            id: self.id,
            name: self.name.clone(),
            characters: self.characters.clone(),
            ..Series::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComicForm {
    pub id: Option<EntityId>,
    pub issue_number: Option<i32>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: AttachmentField,
    pub series: Option<Series>,
    pub characters: Option<Characters>,
}

impl EntityForm for ComicForm {
    type Entity = Comic;

    fn populate(&mut self, comic: &Comic) {
        self.id = comic.id;
        self.issue_number = comic.issue_number;
        self.location = comic.location.clone();
        self.title = comic.title.clone();
        self.description = comic.description.clone();
        self.thumbnail.data = comic.thumbnail.clone();
        self.thumbnail.content_type = comic.thumbnail_content_type.clone();
        self.series = comic.series.clone();
        self.characters = comic.characters.clone();
    }

    fn extract(&self) -> Comic {
        Comic {
            id: self.id,
            issue_number: self.issue_number,
            location: self.location.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            thumbnail: self.thumbnail.data.clone(),
            thumbnail_content_type: self.thumbnail.content_type.clone(),
            series: self.series.clone(),
            characters: self.characters.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharactersForm {
    pub id: Option<EntityId>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub thumbnail: AttachmentField,
}

impl EntityForm for CharactersForm {
    type Entity = Characters;

    fn populate(&mut self, characters: &Characters) {
        self.id = characters.id;
        self.full_name = characters.full_name.clone();
        self.description = characters.description.clone();
        self.thumbnail.data = characters.thumbnail.clone();
        self.thumbnail.content_type = characters.thumbnail_content_type.clone();
    }

    fn extract(&self) -> Characters {
        Characters {
            id: self.id,
            full_name: self.full_name.clone(),
            description: self.description.clone(),
            thumbnail: self.thumbnail.data.clone(),
            thumbnail_content_type: self.thumbnail.content_type.clone(),
            ..Characters::default()
        }
    }
}
