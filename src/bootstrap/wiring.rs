//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `mn-infra` and `mn-app` at the same time.
//! Picks adapters from the loaded [`AppConfig`] and groups them into
//! [`AppDeps`]. Assembly only: no business decisions.
//!
//! 仅用于"组装"，不用于"决策"。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mn_app::AppDeps;
use mn_core::config::AppConfig;
use mn_core::ports::{AuthPort, LaunchFlagPort, ProfileRepositoryPort};
use mn_infra::{
    FileLaunchFlagRepository, InMemoryBackend, RecordingNavigator, SupabaseAuth, SupabaseClient,
    SupabaseConfig, SupabaseProfileRepository, SystemClock,
};
use tracing::{info, warn};

/// Table used when the config leaves `profiles_table` empty.
pub const DEFAULT_PROFILES_TABLE: &str = "hair_profiles";

const APP_DIR_NAME: &str = "mena";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Backend client initialization failed: {0}")]
    BackendInit(String),

    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Which backend the wiring selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Supabase,
    InMemory,
}

/// Assembled dependencies plus the handles the headless runner inspects.
pub struct WiredDependencies {
    pub deps: AppDeps,
    pub navigator: Arc<RecordingNavigator>,
    pub backend: BackendKind,
    pub data_dir: PathBuf,
}

/// Data directory from the config, else the platform data dir.
pub fn resolve_data_dir(config: &AppConfig) -> WiringResult<PathBuf> {
    if !config.data_dir.as_os_str().is_empty() {
        return Ok(config.data_dir.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| WiringError::DataDir("no platform data directory".to_string()))
}

/// Build every port implementation from the config.
///
/// An empty backend URL selects the in-memory backend, so the binary runs
/// without a hosted project.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<WiredDependencies> {
    let data_dir = resolve_data_dir(config)?;

    let (auth, profiles, backend): (
        Arc<dyn AuthPort>,
        Arc<dyn ProfileRepositoryPort>,
        BackendKind,
    ) = if config.backend_url.trim().is_empty() {
        warn!("backend url not configured, using in-memory backend");
        let memory = Arc::new(InMemoryBackend::new());
        (memory.clone(), memory, BackendKind::InMemory)
    } else {
        let client = Arc::new(
            SupabaseClient::new(supabase_config(config))
                .map_err(|e| WiringError::BackendInit(e.to_string()))?,
        );
        let table = if config.profiles_table.trim().is_empty() {
            DEFAULT_PROFILES_TABLE.to_string()
        } else {
            config.profiles_table.clone()
        };
        info!(url = %config.backend_url, table = %table, "using supabase backend");
        (
            Arc::new(SupabaseAuth::new(client.clone())),
            Arc::new(SupabaseProfileRepository::new(client, table)),
            BackendKind::Supabase,
        )
    };

    let launch_flag: Arc<dyn LaunchFlagPort> =
        Arc::new(FileLaunchFlagRepository::with_defaults(data_dir.clone()));
    let navigator = Arc::new(RecordingNavigator::new());

    Ok(WiredDependencies {
        deps: AppDeps {
            auth,
            profiles,
            launch_flag,
            navigation: navigator.clone(),
            clock: Arc::new(SystemClock),
        },
        navigator,
        backend,
        data_dir,
    })
}

fn supabase_config(config: &AppConfig) -> SupabaseConfig {
    SupabaseConfig {
        url: config.backend_url.clone(),
        anon_key: config.backend_anon_key.clone(),
        timeout: (config.request_timeout_secs > 0)
            .then(|| Duration::from_secs(config.request_timeout_secs)),
    }
}
