use std::ops::Deref;
use std::sync::Arc;

use mn_core::{Route, SessionState};
use tokio::sync::Mutex;

use crate::usecases::dispatch::DispatchContext;

/// Session state cell plus the route the shell is showing.
///
/// The route is read and written under the same `dispatch_lock` as the
/// state, so a redirect is always evaluated against a consistent pair.
pub struct SessionContext {
    inner: DispatchContext<SessionState>,
    /// As last reported by the shell or navigated to.
    route: Mutex<Option<Route>>,
}

impl SessionContext {
    pub fn new(initial_state: SessionState) -> Self {
        Self {
            inner: DispatchContext::new(initial_state),
            route: Mutex::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn current_route(&self) -> Option<Route> {
        *self.route.lock().await
    }

    /// Only call with `dispatch_lock` held.
    pub async fn set_route(&self, route: Route) {
        *self.route.lock().await = Some(route);
    }
}

impl Deref for SessionContext {
    type Target = DispatchContext<SessionState>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionState::Unauthenticated)
    }
}
