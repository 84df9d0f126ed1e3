//! View-level use cases over the entity repositories.
//!
//! # Responsibility
//! - Resolve entities for routes, map them to forms, load relationship
//!   options, and run save/delete/list flows.
//! - Keep UI shells decoupled from transport and storage details.
//!
//! # Invariants
//! - Every repository call made here runs inside a `ViewScope`.

pub mod attachment;
pub mod delete;
pub mod editor;
pub mod form;
pub mod list;
pub mod navigation;
pub mod relationship;
pub mod resolver;
pub mod save;
pub mod scope;
