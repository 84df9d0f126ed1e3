//! Entity list view state.
//!
//! # Responsibility
//! - Load the full collection for list screens and track the loading flag.
//! - Open delete confirmations and reload after a confirmed delete.
//!
//! # Invariants
//! - `is_loading` is reset after every load, successful or not.
//! - A failed load keeps the previously shown items.
//! - Only a modal closed with `"deleted"` triggers a reload.

use crate::http::options::RequestOptions;
use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::service::delete::{DeleteDialog, ModalClosed, ModalOutcome};
use crate::service::scope::ViewScope;
use log::warn;
use std::sync::Arc;

pub struct EntityListView<T: Entity> {
    repo: Arc<dyn EntityRepository<T>>,
    options: RequestOptions,
    items: Vec<T>,
    is_loading: bool,
}

impl<T: Entity> EntityListView<T> {
    /// Unfiltered list over `repo`.
    pub fn new(repo: Arc<dyn EntityRepository<T>>) -> Self {
        Self::with_options(repo, RequestOptions::default())
    }

    /// List restricted by criteria, e.g. `RequestOptions::series_by_character`.
    pub fn with_options(repo: Arc<dyn EntityRepository<T>>, options: RequestOptions) -> Self {
        Self {
            repo,
            options,
            items: Vec::new(),
            is_loading: false,
        }
    }

    /// Items from the last successful load.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replaces the items with the repository's current collection.
    pub async fn load_all(&mut self, scope: &ViewScope) -> RepoResult<()> {
        self.is_loading = true;
        let result = scope.run(self.repo.query(&self.options)).await;
        self.is_loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=list_load module=service status=error entity={} error={}",
                    T::ENTITY_NAME,
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens a delete confirmation for `entity`.
    pub fn open_delete(&self, entity: &T) -> (DeleteDialog<T>, ModalClosed) {
        DeleteDialog::open(entity.clone(), Arc::clone(&self.repo))
    }

    /// Reacts to a closed delete modal; returns whether the list reloaded.
    pub async fn on_modal_closed(
        &mut self,
        outcome: &ModalOutcome,
        scope: &ViewScope,
    ) -> RepoResult<bool> {
        if !outcome.is_deleted() {
            return Ok(false);
        }
        self.load_all(scope).await?;
        Ok(true)
    }

    pub fn track_id(item: &T) -> Option<EntityId> {
        item.identifier()
    }
}
