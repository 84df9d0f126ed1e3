//! Modal delete confirmation.
//!
//! # Responsibility
//! - Scope a delete confirmation to one entity instance.
//! - Report how the modal closed to whoever opened it.
//!
//! # Invariants
//! - `cancel` never reaches the repository and reports `Dismissed`.
//! - `confirm_delete` calls `delete` exactly once per confirmation and closes
//!   with `Closed("deleted")` only after the call completed successfully.
//! - A failed delete keeps the modal open so the user can retry or cancel.
//! - Confirming on a closed modal fails with `DeleteError::AlreadyClosed`.

use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::{EntityRepository, RepoError};
use crate::service::scope::ViewScope;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Close reason emitted after a successful delete.
pub const DELETED_REASON: &str = "deleted";

/// How a modal went away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Closed with a result reason, e.g. `"deleted"`.
    Closed(String),
    /// Dismissed without a result (cancel, backdrop, view torn down).
    Dismissed,
}

impl ModalOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Closed(reason) if reason == DELETED_REASON)
    }
}

#[derive(Debug)]
pub enum DeleteError {
    /// The modal was already cancelled or closed; nothing was sent.
    AlreadyClosed,
    Repo(RepoError),
}

impl Display for DeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyClosed => write!(f, "delete dialog is already closed"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeleteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::AlreadyClosed => None,
        }
    }
}

impl From<RepoError> for DeleteError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Opener-side handle resolving once the modal goes away.
#[derive(Debug)]
pub struct ModalClosed {
    receiver: oneshot::Receiver<ModalOutcome>,
}

impl ModalClosed {
    /// Waits for the modal; a dialog dropped while open counts as dismissed.
    pub async fn outcome(self) -> ModalOutcome {
        self.receiver.await.unwrap_or(ModalOutcome::Dismissed)
    }
}

/// Delete confirmation dialog for one entity.
pub struct DeleteDialog<T: Entity> {
    entity: T,
    repo: Arc<dyn EntityRepository<T>>,
    closer: Option<oneshot::Sender<ModalOutcome>>,
}

impl<T: Entity> DeleteDialog<T> {
    pub fn open(entity: T, repo: Arc<dyn EntityRepository<T>>) -> (Self, ModalClosed) {
        let (sender, receiver) = oneshot::channel();
        let dialog = Self {
            entity,
            repo,
            closer: Some(sender),
        };
        (dialog, ModalClosed { receiver })
    }

    /// Entity the confirmation is about.
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// Returns true until the modal is cancelled or closed after a delete.
    pub fn is_open(&self) -> bool {
        self.closer.is_some()
    }

    /// Dismisses the modal without touching the repository.
    pub fn cancel(&mut self) {
        self.finish(ModalOutcome::Dismissed);
    }

    /// Deletes `id` and closes the modal with the `"deleted"` reason.
    pub async fn confirm_delete(
        &mut self,
        id: EntityId,
        scope: &ViewScope,
    ) -> Result<(), DeleteError> {
        if !self.is_open() {
            warn!(
                "event=entity_delete module=service status=rejected entity={} id={} reason=closed",
                T::ENTITY_NAME,
                id
            );
            return Err(DeleteError::AlreadyClosed);
        }
        match scope.run(self.repo.delete(id)).await {
            Ok(()) => {
                info!(
                    "event=entity_delete module=service status=ok entity={} id={}",
                    T::ENTITY_NAME,
                    id
                );
                self.finish(ModalOutcome::Closed(DELETED_REASON.to_string()));
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=entity_delete module=service status=error entity={} id={} error={}",
                    T::ENTITY_NAME,
                    id,
                    err
                );
                Err(err.into())
            }
        }
    }

    fn finish(&mut self, outcome: ModalOutcome) {
        if let Some(closer) = self.closer.take() {
            let _ = closer.send(outcome);
        }
    }
}
