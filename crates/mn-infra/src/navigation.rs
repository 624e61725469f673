//! Navigation adapter that records every route change.
//!
//! Used by the headless binary and by tests; a UI shell provides its own
//! `NavigationPort`.

use std::sync::Mutex;

use mn_core::ports::NavigationPort;
use mn_core::Route;
use tracing::info;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route navigated to, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().copied())
    }

    fn record(&self, route: &Route, mode: &'static str) {
        info!(route = %route, mode, "navigate");
        if let Ok(mut history) = self.history.lock() {
            history.push(*route);
        }
    }
}

impl NavigationPort for RecordingNavigator {
    fn replace(&self, route: &Route) {
        self.record(route, "replace");
    }

    fn push(&self, route: &Route) {
        self.record(route, "push");
    }
}
