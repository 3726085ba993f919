//! Single-flight refresh coordination
//!
//! The first request to hit a 401 takes a [`RefreshLease`] and performs the
//! refresh. Requests that hit a 401 while the lease is held get a
//! [`PendingResult`] and wait for the leader's outcome. Settling the lease
//! clears the in-flight flag, drains the queue, and hands each waiter a copy
//! of the outcome in the order it queued.
//!
//! The mutex is only held for flag/queue bookkeeping, never across an await.
//! A lease dropped without being settled (leader future cancelled) releases
//! its waiters with [`RefreshError::Abandoned`] so nobody waits forever.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use common::Secret;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::RefreshError;

/// What a refresh hands to every waiter: the new access token or the error.
pub type RefreshOutcome = std::result::Result<Secret<String>, RefreshError>;

#[derive(Default)]
struct CoordinationState {
    in_flight: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

/// Owner of the `in_flight` flag and the queue of pending results.
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<CoordinationState>,
}

/// Result of [`RefreshCoordinator::join`].
pub enum Turn<'a> {
    /// No refresh was running; the caller must perform it and settle the lease.
    Lead(RefreshLease<'a>),
    /// A refresh is running; await its outcome.
    Wait(PendingResult),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the refresh leader, or queue behind the current one.
    pub fn join(&self) -> Turn<'_> {
        let mut state = self.lock();
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            debug!(queued = state.waiters.len(), "refresh in flight, request queued");
            Turn::Wait(PendingResult { rx })
        } else {
            state.in_flight = true;
            debug!("refresh lease taken");
            Turn::Lead(RefreshLease {
                coordinator: self,
                settled: false,
            })
        }
    }

    /// Whether a refresh is currently outstanding.
    pub fn in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Number of requests waiting on the current refresh.
    pub fn queued(&self) -> usize {
        self.lock().waiters.len()
    }

    fn settle(&self, outcome: &RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.lock();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        let released = waiters.len();
        for waiter in waiters {
            // A waiter whose caller went away has dropped its receiver.
            let _ = waiter.send(outcome.clone());
        }
        released
    }

    fn lock(&self) -> MutexGuard<'_, CoordinationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive right to perform the current refresh.
#[must_use = "a lease must be settled with the refresh outcome"]
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Publish the outcome to every waiter and release the in-flight flag.
    ///
    /// Returns the number of queued requests that were released.
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        self.coordinator.settle(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let released = self.coordinator.settle(&Err(RefreshError::Abandoned));
            warn!(released, "refresh lease dropped before settling");
        }
    }
}

/// A queued request's handle on the in-flight refresh.
pub struct PendingResult {
    rx: oneshot::Receiver<RefreshOutcome>,
}

impl PendingResult {
    /// Wait for the leader to settle.
    pub async fn outcome(self) -> RefreshOutcome {
        self.rx.await.unwrap_or(Err(RefreshError::Abandoned))
    }
}
