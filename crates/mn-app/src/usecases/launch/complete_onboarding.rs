use std::sync::Arc;

use mn_core::ports::LaunchFlagPort;
use mn_core::Route;
use tracing::warn;

/// Use case for completing (or skipping) onboarding.
///
/// Marks the first launch as done so onboarding is not shown again.
pub struct CompleteOnboarding {
    launch_flag: Arc<dyn LaunchFlagPort>,
}

impl CompleteOnboarding {
    pub fn new(launch_flag: Arc<dyn LaunchFlagPort>) -> Self {
        Self { launch_flag }
    }

    /// Convenience constructor for the use case accessor pattern.
    pub fn from_ports(launch_flag: Arc<dyn LaunchFlagPort>) -> Self {
        Self::new(launch_flag)
    }

    /// Set the flag and return the route to continue to. The user moves on
    /// to the welcome screen even when the flag cannot be written.
    pub async fn execute(&self) -> Route {
        if let Err(err) = self.mark_completed().await {
            warn!(error = %err, "failed to persist launch flag");
        }
        Route::Welcome
    }

    async fn mark_completed(&self) -> anyhow::Result<()> {
        let mut state = self.launch_flag.get_state().await?;
        state.has_completed_first_launch = true;
        self.launch_flag.set_state(&state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::launch::test_support::MockLaunchFlagPort;
    use crate::usecases::ResolveLaunchRoute;
    use mn_core::launch::LaunchState;

    #[tokio::test]
    async fn test_execute_marks_first_launch_complete() {
        let mock = Arc::new(MockLaunchFlagPort::new(LaunchState::default()));
        let use_case = CompleteOnboarding::new(mock.clone());

        assert!(!mock.has_completed().await.unwrap());

        assert_eq!(use_case.execute().await, Route::Welcome);

        assert!(mock.has_completed().await.unwrap());
        assert_eq!(
            ResolveLaunchRoute::new(mock).execute().await,
            Route::Welcome
        );
    }

    #[tokio::test]
    async fn test_execute_continues_when_storage_fails() {
        let mock = Arc::new(MockLaunchFlagPort::failing());
        let use_case = CompleteOnboarding::new(mock);

        assert_eq!(use_case.execute().await, Route::Welcome);
    }
}
