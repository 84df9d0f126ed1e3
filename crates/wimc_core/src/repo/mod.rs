//! Repository layer over the remote REST resources.
//!
//! # Responsibility
//! - Define the capability contract shared by all entity types.
//! - Keep URL layout and status mapping inside one generic implementation.
//!
//! # Invariants
//! - Repository writes must pass `Entity::validate()` before leaving the process.
//! - Absence on `find` is a value (`None`), transport and status failures are errors.

pub mod entity_repo;

use crate::model::characters::Characters;
use crate::model::comic::Comic;
use crate::model::series::Series;
use entity_repo::RestEntityRepository;

pub type SeriesRepository = RestEntityRepository<Series>;
pub type ComicRepository = RestEntityRepository<Comic>;
pub type CharactersRepository = RestEntityRepository<Characters>;
