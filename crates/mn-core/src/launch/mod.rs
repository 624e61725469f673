//! Launch gate domain model.

/// First-launch flag persisted across app restarts.
///
/// 首次启动标记（跨重启持久化）。
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LaunchState {
    pub has_completed_first_launch: bool,
}

impl LaunchState {
    pub fn completed() -> Self {
        Self {
            has_completed_first_launch: true,
        }
    }
}
