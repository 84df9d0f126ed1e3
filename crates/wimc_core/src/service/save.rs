//! Save lifecycle for edit views.
//!
//! # Responsibility
//! - Drive `Idle -> Saving -> {Saved | Idle}` around one create/update call.
//! - Navigate back only after a successful save.
//!
//! # Invariants
//! - `is_saving()` turns true before the first await of `save`.
//! - The saving flag is reset by a scope guard before the outcome is handled,
//!   on success, failure and cancellation alike.
//! - Failures leave form state untouched and are never retried.
//!
//! # See also
//! - `service::navigation::Navigator`

use crate::model::entity::{Entity, Identified};
use crate::repo::entity_repo::{EntityRepository, RepoError};
use crate::service::form::EntityForm;
use crate::service::navigation::Navigator;
use crate::service::scope::ViewScope;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    /// Terminal: the view is being left.
    Saved,
}

#[derive(Debug)]
pub enum SaveError {
    /// A save is already in flight for this view.
    AlreadySaving,
    Repo(RepoError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySaving => write!(f, "a save is already in progress"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::AlreadySaving => None,
        }
    }
}

impl From<RepoError> for SaveError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Save state machine for one edit view.
#[derive(Debug)]
pub struct SaveLifecycle {
    state: watch::Sender<SaveState>,
}

impl Default for SaveLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveLifecycle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SaveState::Idle);
        Self { state }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SaveState {
        *self.state.borrow()
    }

    /// Returns true while a create/update call is in flight.
    pub fn is_saving(&self) -> bool {
        self.state() == SaveState::Saving
    }

    /// Lets the view observe state transitions (e.g. to disable the button).
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state.subscribe()
    }

    /// Persists the form: `create` when it has no id, `update` otherwise.
    pub async fn save<F: EntityForm>(
        &self,
        form: &F,
        repo: &dyn EntityRepository<F::Entity>,
        navigator: &dyn Navigator,
        scope: &ViewScope,
    ) -> Result<F::Entity, SaveError> {
        if self.is_saving() {
            return Err(SaveError::AlreadySaving);
        }

        let entity = form.extract();
        let is_new = entity.identifier().is_none();
        let guard = SavingGuard::begin(&self.state);
        let result = if is_new {
            scope.run(repo.create(&entity)).await
        } else {
            scope.run(repo.update(&entity)).await
        };
        drop(guard);

        match result {
            Ok(saved) => {
                self.state.send_replace(SaveState::Saved);
                info!(
                    "event=entity_save module=service status=ok entity={} op={} id={:?}",
                    F::Entity::ENTITY_NAME,
                    if is_new { "create" } else { "update" },
                    saved.identifier()
                );
                navigator.back();
                Ok(saved)
            }
            Err(err) => {
                error!(
                    "event=entity_save module=service status=error entity={} op={} error={}",
                    F::Entity::ENTITY_NAME,
                    if is_new { "create" } else { "update" },
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Holds `Saving` for its lifetime and restores `Idle` when dropped.
struct SavingGuard<'a> {
    state: &'a watch::Sender<SaveState>,
}

impl<'a> SavingGuard<'a> {
    fn begin(state: &'a watch::Sender<SaveState>) -> Self {
        state.send_replace(SaveState::Saving);
        Self { state }
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(SaveState::Idle);
    }
}
