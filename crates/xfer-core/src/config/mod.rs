//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps the TOML configuration file onto [`AppConfig`]. Missing keys fall
//! back to documented defaults; values are taken as they are found. Reading
//! the file lives in `xfer-infra`.

use std::path::PathBuf;
use std::time::Duration;

/// Auto-clear delay of the error banner unless configured otherwise.
pub const DEFAULT_ERROR_CLEAR_AFTER_MS: u64 = 10_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTHENTICATE_PATH: &str = "/authenticate";

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the transfer service, e.g. `https://transfer.example.edu`
    pub base_url: String,

    /// Per-request timeout for gateway calls
    pub http_timeout: Duration,

    /// How long an error message stays visible
    pub error_clear_after: Duration,

    /// Path of the external authentication endpoint on `base_url`
    pub authenticate_path: String,

    /// Where the authentication exchange drops its transient credential
    pub credential_path: Option<PathBuf>,

    /// Directory for daily log files; stdout only when absent
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));

        let base_url = get("server", "base_url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("server.base_url is required"))?
            .trim_end_matches('/')
            .to_string();

        let as_u64 = |v: &toml::Value| v.as_integer().and_then(|i| u64::try_from(i).ok());

        Ok(Self {
            base_url,
            http_timeout: Duration::from_secs(
                get("http", "timeout_secs")
                    .and_then(as_u64)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            error_clear_after: Duration::from_millis(
                get("errors", "clear_after_ms")
                    .and_then(as_u64)
                    .unwrap_or(DEFAULT_ERROR_CLEAR_AFTER_MS),
            ),
            authenticate_path: get("auth", "authenticate_path")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_AUTHENTICATE_PATH)
                .to_string(),
            credential_path: get("auth", "credential_path")
                .and_then(|v| v.as_str())
                .map(PathBuf::from),
            log_dir: get("logging", "dir").and_then(|v| v.as_str()).map(PathBuf::from),
        })
    }

    /// Config pointing at `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            error_clear_after: Duration::from_millis(DEFAULT_ERROR_CLEAR_AFTER_MS),
            authenticate_path: DEFAULT_AUTHENTICATE_PATH.to_string(),
            credential_path: None,
            log_dir: None,
        }
    }
}
