//! Headless app run: wire, boot the session router and settle on a route.

use std::sync::Arc;

use mn_app::App;
use mn_core::config::AppConfig;
use mn_core::ports::NavigationPort;
use mn_core::{Route, SessionState};
use tracing::{info, info_span, Instrument};

use super::wiring::{wire_dependencies, BackendKind};

/// Where a run ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub backend: BackendKind,
    pub state: SessionState,
    pub route: Option<Route>,
}

/// Start at the launch screen, boot the router, and follow the launch gate
/// when nobody is signed in.
pub async fn run_app(config: AppConfig) -> anyhow::Result<RunSummary> {
    let wired = wire_dependencies(&config)?;
    let navigator = wired.navigator.clone();
    let backend = wired.backend;
    let app = Arc::new(App::new(wired.deps));

    async {
        let listener = app.router.start_auth_listener();

        navigator.replace(&Route::Launch);
        app.router.route_changed(Route::Launch).await;

        let state = app.router.boot().await;
        if !state.is_authenticated() {
            let next = app.resolve_launch_route.execute().await;
            navigator.replace(&next);
            app.router.route_changed(next).await;
        }

        let route = app.router.current_route().await;
        listener.abort();

        info!(
            state = state.as_str(),
            route = ?route.map(|r| r.path()),
            "app settled"
        );
        Ok(RunSummary {
            backend,
            state,
            route,
        })
    }
    .instrument(info_span!("bootstrap.run_app", data_dir = %wired.data_dir.display()))
    .await
}
