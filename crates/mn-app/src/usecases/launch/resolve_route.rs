use std::sync::Arc;

use mn_core::ports::LaunchFlagPort;
use mn_core::Route;
use tracing::warn;

/// Use case deciding where the launch screen continues.
///
/// First launch goes to onboarding, every later launch to the welcome
/// screen.
pub struct ResolveLaunchRoute {
    launch_flag: Arc<dyn LaunchFlagPort>,
}

impl ResolveLaunchRoute {
    pub fn new(launch_flag: Arc<dyn LaunchFlagPort>) -> Self {
        Self { launch_flag }
    }

    /// Convenience constructor for the use case accessor pattern.
    pub fn from_ports(launch_flag: Arc<dyn LaunchFlagPort>) -> Self {
        Self::new(launch_flag)
    }

    /// A storage failure falls back to the welcome screen.
    pub async fn execute(&self) -> Route {
        match self.launch_flag.has_completed().await {
            Ok(false) => Route::Onboarding,
            Ok(true) => Route::Welcome,
            Err(err) => {
                warn!(error = %err, "failed to read launch flag, skipping onboarding");
                Route::Welcome
            }
        }
    }
}
