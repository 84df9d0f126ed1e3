//! Route-driven entity resolution.
//!
//! # Responsibility
//! - Produce the entity an edit/detail view renders before it activates.
//! - Redirect dead links to the not-found route.
//!
//! # Invariants
//! - No id: a fresh default entity, zero repository calls.
//! - Id with an existing entity: that entity.
//! - Id with no entity: exactly one navigation to the not-found route and
//!   activation is cancelled (no value, no error).
//! - Transport failures propagate unchanged; nothing is retried.

use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::{EntityRepository, RepoError, RepoResult};
use crate::service::navigation::Navigator;
use crate::service::scope::ViewScope;
use log::{info, warn};
use std::sync::Arc;

/// Outcome of resolving a route before view activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation<T> {
    /// The view may render with this entity.
    Proceed(T),
    /// Navigation was redirected; the view must not activate.
    Cancelled,
}

impl<T> Activation<T> {
    pub fn into_entity(self) -> Option<T> {
        match self {
            Self::Proceed(entity) => Some(entity),
            Self::Cancelled => None,
        }
    }
}

/// Fetch-or-default guard for one entity type.
pub struct EntityResolver<T: Entity> {
    repo: Arc<dyn EntityRepository<T>>,
    navigator: Arc<dyn Navigator>,
    not_found_route: String,
}

impl<T: Entity> EntityResolver<T> {
    /// Creates a resolver redirecting misses to `not_found_route`.
    pub fn new(
        repo: Arc<dyn EntityRepository<T>>,
        navigator: Arc<dyn Navigator>,
        not_found_route: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            navigator,
            not_found_route: not_found_route.into(),
        }
    }

    /// Resolves the `:id` route parameter (absent on the `new` route).
    pub async fn resolve(
        &self,
        route_id: Option<&str>,
        scope: &ViewScope,
    ) -> RepoResult<Activation<T>> {
        let Some(id) = parse_route_id(route_id)? else {
            return Ok(Activation::Proceed(T::default()));
        };

        match scope.run(self.repo.find(id)).await? {
            Some(entity) => Ok(Activation::Proceed(entity)),
            None => {
                warn!(
                    "event=resolve module=service status=not_found entity={} id={}",
                    T::ENTITY_NAME,
                    id
                );
                self.navigator.navigate(&self.not_found_route);
                info!(
                    "event=navigate module=service status=ok route={}",
                    self.not_found_route
                );
                Ok(Activation::Cancelled)
            }
        }
    }
}

/// Reads an optional route parameter; empty means absent.
pub fn parse_route_id(route_id: Option<&str>) -> RepoResult<Option<EntityId>> {
    let Some(raw) = route_id.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<EntityId>()
        .map(Some)
        .map_err(|_| RepoError::InvalidIdentifier(raw.to_string()))
}
