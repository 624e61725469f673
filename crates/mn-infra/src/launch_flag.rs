//! First-launch flag kept as a small JSON file under the data directory.

use anyhow::Context;
use async_trait::async_trait;
use mn_core::launch::LaunchState;
use mn_core::ports::LaunchFlagPort;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub const DEFAULT_LAUNCH_STATE_FILE: &str = ".launch_state";

/// `LaunchFlagPort` over a single file. A missing or blank file means the
/// welcome screen has not been dismissed yet.
pub struct FileLaunchFlagRepository {
    state_file_path: PathBuf,
}

impl FileLaunchFlagRepository {
    pub fn new(state_file_path: PathBuf) -> Self {
        Self { state_file_path }
    }

    /// `<data_dir>/.launch_state`
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            state_file_path: base_dir.join(DEFAULT_LAUNCH_STATE_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.state_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl LaunchFlagPort for FileLaunchFlagRepository {
    async fn get_state(&self) -> anyhow::Result<LaunchState> {
        if !fs::try_exists(&self.state_file_path).await? {
            return Ok(LaunchState::default());
        }

        let content = fs::read_to_string(&self.state_file_path).await?;
        if content.trim().is_empty() {
            return Ok(LaunchState::default());
        }

        serde_json::from_str(&content).context("Failed to parse launch state")
    }

    /// Written to a sibling `.tmp` file, then renamed over the target.
    async fn set_state(&self, state: &LaunchState) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_vec_pretty(state).context("Failed to serialize launch state")?;
        let tmp_path = self.state_file_path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        file.write_all(&json)
            .await
            .context("Failed to write launch state")?;
        file.sync_all()
            .await
            .context("Failed to sync launch state")?;
        drop(file);

        fs::rename(&tmp_path, &self.state_file_path)
            .await
            .with_context(|| format!("Failed to replace {}", self.state_file_path.display()))?;
        debug!(path = %self.state_file_path.display(), ?state, "launch state saved");
        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        if fs::try_exists(&self.state_file_path).await? {
            fs::remove_file(&self.state_file_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn flag_in(dir: &TempDir) -> FileLaunchFlagRepository {
        FileLaunchFlagRepository::with_defaults(dir.path().to_path_buf())
    }

    fn write_flag(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(DEFAULT_LAUNCH_STATE_FILE), content).unwrap();
    }

    #[tokio::test]
    async fn first_launch_without_file() {
        let dir = TempDir::new().unwrap();
        assert!(!flag_in(&dir).has_completed().await.unwrap());
    }

    #[tokio::test]
    async fn blank_file_counts_as_first_launch() {
        let dir = TempDir::new().unwrap();
        write_flag(&dir, "  \n");
        assert_eq!(flag_in(&dir).get_state().await.unwrap(), LaunchState::default());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_flag(&dir, "{not json");
        let err = flag_in(&dir).get_state().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse launch state"));
    }

    #[tokio::test]
    async fn dismissing_welcome_survives_a_new_handle() {
        let dir = TempDir::new().unwrap();
        let nested = FileLaunchFlagRepository::with_defaults(dir.path().join("app/data"));
        nested.set_state(&LaunchState::completed()).await.unwrap();

        let reopened = FileLaunchFlagRepository::with_defaults(dir.path().join("app/data"));
        assert!(reopened.has_completed().await.unwrap());
    }

    #[tokio::test]
    async fn reset_shows_welcome_again() {
        let dir = TempDir::new().unwrap();
        let flag = flag_in(&dir);
        flag.set_state(&LaunchState::completed()).await.unwrap();

        flag.reset().await.unwrap();
        assert!(!flag.has_completed().await.unwrap());
        flag.reset().await.unwrap();
    }

    #[tokio::test]
    async fn stale_temp_file_from_interrupted_write_is_replaced() {
        let dir = TempDir::new().unwrap();
        let tmp = dir.path().join(DEFAULT_LAUNCH_STATE_FILE).with_extension("tmp");
        std::fs::write(&tmp, "{\"has_completed_first_launch\": tru").unwrap();

        let flag = flag_in(&dir);
        flag.set_state(&LaunchState::completed()).await.unwrap();

        assert!(flag.has_completed().await.unwrap());
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(DEFAULT_LAUNCH_STATE_FILE)]);
    }
}
