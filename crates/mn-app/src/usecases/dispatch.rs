//! State cell shared by the orchestrators.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Orchestrator state plus the lock that serializes dispatches.
///
/// ## Lock Ordering
/// Acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole dispatch (transition, side effects,
///   follow-up events).
/// - `state`: held only for a single read or write.
pub struct DispatchContext<S> {
    state: Mutex<S>,
    dispatch_lock: Mutex<()>,
}

impl<S: Clone> DispatchContext<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Snapshot read; does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> S {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call with `dispatch_lock` held.
    pub async fn set_state(&self, state: S) {
        *self.state.lock().await = state;
    }
}

impl<S: Clone + Default> Default for DispatchContext<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
