//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! Configuration data structures and the TOML → DTO mapping. No validation
//! and no default-value policy live here; the bootstrap layer decides what
//! an empty value means.
//!
//! 此模块只包含数据结构定义，禁止验证逻辑与默认值计算。

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL (may be empty - this is a fact, not an error)
    /// 后端地址（可能为空）
    pub backend_url: String,

    /// Public anon key sent as the `apikey` header
    pub backend_anon_key: String,

    /// Table holding hair profile rows
    pub profiles_table: String,

    /// HTTP request timeout in seconds (0 = not set)
    pub request_timeout_secs: u64,

    /// Local data directory (path info only, no existence check)
    /// 本地数据目录（仅路径信息，不检查是否存在）
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited / 禁止**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let backend = toml_value.get("backend");
        let backend_str = |key: &str| {
            backend
                .and_then(|b| b.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            backend_url: backend_str("url"),
            backend_anon_key: backend_str("anon_key"),
            profiles_table: backend_str("profiles_table"),
            request_timeout_secs: backend
                .and_then(|b| b.get("request_timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            backend_url: String::new(),
            backend_anon_key: String::new(),
            profiles_table: String::new(),
            request_timeout_secs: 0,
            data_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    /// 生产环境使用：创建具有系统默认路径的 AppConfig
    ///
    /// The base directory is computed by the caller (e.g. with `dirs`).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::empty()
        }
    }
}
