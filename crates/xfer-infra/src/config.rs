//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and hands it to [`AppConfig::from_toml`]. Defaults and
//! key mapping live there; this module only does I/O and parsing.

use std::path::Path;

use anyhow::Context;
use xfer_core::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [server]
            base_url = "https://transfer.example.edu"

            [errors]
            clear_after_ms = 6000

            [auth]
            credential_path = "/run/xfer/credential.json"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.base_url, "https://transfer.example.edu");
        assert_eq!(config.error_clear_after, Duration::from_millis(6000));
        assert_eq!(
            config.credential_path,
            Some(PathBuf::from("/run/xfer/credential.json"))
        );
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_config_returns_error_on_missing_file() {
        let err = load_config(Path::new("/this/path/does/not/exist/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_error_on_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[server\nbase_url = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_requires_base_url() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[http]\ntimeout_secs = 5\n").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("server.base_url"));
    }
}
