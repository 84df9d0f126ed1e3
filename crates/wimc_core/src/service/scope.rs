//! View-scoped cancellation.
//!
//! # Responsibility
//! - Tie in-flight repository calls to the lifetime of the view that issued them.
//!
//! # Invariants
//! - Dropping a `ViewScope` cancels it; calls still running resolve to
//!   `RepoError::Cancelled` and their request futures are dropped.
//! - A cancelled scope never becomes active again.

use crate::repo::entity_repo::{RepoError, RepoResult};
use log::debug;
use std::future::Future;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Cancellation handle owned by one view instance.
#[derive(Debug)]
pub struct ViewScope {
    name: &'static str,
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            name,
            token,
            _guard: guard,
        }
    }

    /// Returns a token observers can await; cancelled when the view closes.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Tears the view down explicitly.
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            debug!("event=view_close module=service status=ok view={}", self.name);
        }
        self.token.cancel();
    }

    /// Runs `call` unless the view closes first.
    pub async fn run<T, F>(&self, call: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(RepoError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(
                    "event=view_call module=service status=cancelled view={}",
                    self.name
                );
                Err(RepoError::Cancelled)
            }
            result = call => result,
        }
    }
}
