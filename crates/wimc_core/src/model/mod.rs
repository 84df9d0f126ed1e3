//! Client-side domain model for the comic catalogue.
//!
//! # Responsibility
//! - Define the Series / Comic / Characters entity shapes as sent on the wire.
//! - Keep relationship fields as owned nested entities, not bare ids.
//! - Provide the identity-based collection merge used by option lists.
//!
//! # Invariants
//! - Entities are values: views build new ones instead of mutating shared state.
//! - Identity is decided by `Identified::identifier` only.

pub mod characters;
pub mod collection;
pub mod comic;
pub mod entity;
pub mod series;
