//! Launch flag port
//!
//! Persists the "has completed first launch" flag. Implementations are
//! provided by the infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::launch::LaunchState;

#[async_trait]
pub trait LaunchFlagPort: Send + Sync {
    /// Get current launch state
    async fn get_state(&self) -> anyhow::Result<LaunchState>;

    /// Update launch state
    async fn set_state(&self, state: &LaunchState) -> anyhow::Result<()>;

    /// Reset the flag (shows onboarding again on next launch)
    async fn reset(&self) -> anyhow::Result<()>;

    async fn has_completed(&self) -> anyhow::Result<bool> {
        Ok(self.get_state().await?.has_completed_first_launch)
    }
}
