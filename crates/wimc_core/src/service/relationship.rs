//! Relationship option loading for edit views.
//!
//! # Responsibility
//! - Keep the per-view working collection of selectable related entities.
//! - Guarantee the current selection is always one of the options.
//!
//! # Invariants
//! - Seeding and merging go through `merge_missing`, so every option id is unique.
//! - Selection-derived entries precede server-returned ones.
//! - A failed query leaves the working collection as it was.

use crate::http::options::RequestOptions;
use crate::model::collection::merge_missing;
use crate::model::entity::Entity;
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::service::scope::ViewScope;
use log::{debug, error};

/// Working option list for one related entity type, owned by one view.
#[derive(Debug, Clone)]
pub struct RelationshipOptions<R: Entity> {
    options: Vec<R>,
}

impl<R: Entity> Default for RelationshipOptions<R> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<R: Entity> RelationshipOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[R] {
        &self.options
    }

    /// Makes the owning entity's current relation(s) selectable right away.
    pub fn seed<'a, I>(&mut self, existing: I)
    where
        I: IntoIterator<Item = Option<&'a R>>,
    {
        let current = std::mem::take(&mut self.options);
        self.options = merge_missing(current, existing);
    }

    /// Fetches the general option set from the related repository.
    pub async fn fetch(
        repo: &dyn EntityRepository<R>,
        options: &RequestOptions,
        scope: &ViewScope,
    ) -> RepoResult<Vec<R>> {
        scope.run(repo.query(options)).await
    }

    /// Replaces the working collection with `fetched` plus the selection.
    pub fn apply<'a, I>(&mut self, fetched: Vec<R>, selection: I)
    where
        I: IntoIterator<Item = Option<&'a R>>,
    {
        self.options = merge_missing(fetched, selection);
    }

    /// Queries the options and merges `selection` in once the query resolves.
    pub async fn load<'a, I>(
        &mut self,
        repo: &dyn EntityRepository<R>,
        scope: &ViewScope,
        selection: I,
    ) -> RepoResult<()>
    where
        I: IntoIterator<Item = Option<&'a R>>,
    {
        match Self::fetch(repo, &RequestOptions::default(), scope).await {
            Ok(fetched) => {
                self.apply(fetched, selection);
                debug!(
                    "event=relationship_load module=service status=ok entity={} options={}",
                    R::ENTITY_NAME,
                    self.options.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=relationship_load module=service status=error entity={} error={}",
                    R::ENTITY_NAME,
                    err
                );
                Err(err)
            }
        }
    }
}
