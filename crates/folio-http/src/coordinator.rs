//! Single-flight token refresh.
//!
//! [`TokenRefreshCoordinator`] guarantees that at most one refresh call is in
//! flight. The first caller to need a new token becomes the cycle's leader and
//! runs the refresh; everyone arriving while the cycle is open is queued and
//! receives the leader's outcome once it settles.
//!
//! ```text
//! IDLE --first caller--> REFRESHING --outcome--> IDLE
//!                         ^      |
//!                         +------+ later callers queue
//! ```
//!
//! The state lock is a plain mutex held only for check-and-set and for taking
//! the queue, never across an await.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, trace};

use folio_core::{AccessToken, ApiError};

/// What a refresh cycle resolves to.
pub type RefreshOutcome = Result<AccessToken, ApiError>;

/// Owns the refresh flag and the queue of requests waiting on it.
#[derive(Debug, Default)]
pub struct TokenRefreshCoordinator {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    state: RefreshState,
    cycles: u64,
}

#[derive(Debug, Default)]
enum RefreshState {
    #[default]
    Idle,
    Refreshing {
        cycle: u64,
        waiters: Vec<oneshot::Sender<RefreshOutcome>>,
    },
}

enum Role {
    Leader(u64),
    Waiter(u64, oneshot::Receiver<RefreshOutcome>),
}

impl TokenRefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a refresh call is in flight.
    pub fn is_refreshing(&self) -> bool {
        matches!(self.lock().state, RefreshState::Refreshing { .. })
    }

    /// Number of callers queued on the open cycle.
    pub fn queued(&self) -> usize {
        match &self.lock().state {
            RefreshState::Refreshing { waiters, .. } => {
                waiters.iter().filter(|tx| !tx.is_closed()).count()
            }
            RefreshState::Idle => 0,
        }
    }

    /// Number of refresh cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.lock().cycles
    }

    /// Obtain a new access token, running `refresh` only if no cycle is open.
    ///
    /// Callers that join an open cycle get exactly that cycle's outcome. If a
    /// leader is dropped before settling, its waiters start over and one of
    /// them leads a fresh cycle.
    pub async fn refresh<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let mut refresh = Some(refresh);

        loop {
            match self.join() {
                Role::Waiter(cycle, rx) => match rx.await {
                    Ok(outcome) => {
                        trace!(cycle, "Queued request released");
                        return outcome;
                    }
                    Err(_) => {
                        debug!(cycle, "Refresh cycle abandoned, rejoining");
                        continue;
                    }
                },
                Role::Leader(cycle) => {
                    // A caller leads at most once: a leader never becomes a waiter.
                    let Some(refresh) = refresh.take() else {
                        unreachable!("leader role taken twice by one caller");
                    };
                    let guard = CycleGuard {
                        coordinator: self,
                        cycle,
                        settled: false,
                    };
                    let outcome = refresh().await;
                    guard.settle(&outcome);
                    return outcome;
                }
            }
        }
    }

    fn join(&self) -> Role {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if let RefreshState::Refreshing { cycle, waiters } = &mut inner.state {
            waiters.retain(|tx| !tx.is_closed());
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            debug!(cycle = *cycle, queued = waiters.len(), "Refresh in flight, queuing request");
            return Role::Waiter(*cycle, rx);
        }

        inner.cycles += 1;
        let cycle = inner.cycles;
        inner.state = RefreshState::Refreshing {
            cycle,
            waiters: Vec::new(),
        };
        debug!(cycle, "Starting refresh cycle");
        Role::Leader(cycle)
    }

    /// Close `cycle` and hand back its queue.
    fn close(&self, cycle: u64) -> Vec<oneshot::Sender<RefreshOutcome>> {
        let mut inner = self.lock();
        match std::mem::take(&mut inner.state) {
            RefreshState::Refreshing {
                cycle: open,
                waiters,
            } if open == cycle => waiters,
            other => {
                // Only the leader of the open cycle closes it.
                inner.state = other;
                Vec::new()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the coordinator to idle even if the leader never settles.
struct CycleGuard<'a> {
    coordinator: &'a TokenRefreshCoordinator,
    cycle: u64,
    settled: bool,
}

impl CycleGuard<'_> {
    fn settle(mut self, outcome: &RefreshOutcome) {
        self.settled = true;
        let waiters = self.coordinator.close(self.cycle);
        debug!(
            cycle = self.cycle,
            waiters = waiters.len(),
            success = outcome.is_ok(),
            "Refresh cycle settled"
        );
        for tx in waiters {
            // A closed receiver means that caller went away; skip it.
            let _ = tx.send(outcome.clone());
        }
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            // Dropping the senders wakes the waiters with a receive error.
            let waiters = self.coordinator.close(self.cycle);
            debug!(
                cycle = self.cycle,
                waiters = waiters.len(),
                "Refresh leader dropped before settling"
            );
        }
    }
}
