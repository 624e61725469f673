//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file into the [`AppConfig`] DTO. Accepts whatever is in
//! the file: empty values are facts, not errors. Defaults are decided in
//! [`wiring`](super::wiring).
//!
//! 仅纯数据加载，不做验证。

use std::path::{Path, PathBuf};

use anyhow::Context;
use mn_core::config::AppConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MENA_CONFIG";
/// Backend URL override, read after `.env` is loaded.
pub const BACKEND_URL_ENV: &str = "MENA_BACKEND_URL";
/// Anon key override, read after `.env` is loaded.
pub const BACKEND_ANON_KEY_ENV: &str = "MENA_BACKEND_ANON_KEY";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Config file to read: `$MENA_CONFIG`, else `config.toml` in the working
/// directory when present.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

/// Overlay backend credentials from the environment. Set variables win over
/// the file, unset ones leave it alone.
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        config.backend_url = url;
    }
    if let Ok(key) = std::env::var(BACKEND_ANON_KEY_ENV) {
        config.backend_anon_key = key;
    }
    config
}
