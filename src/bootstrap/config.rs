//! Where the configuration file is.

use std::path::PathBuf;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "XFER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "xfer.toml";

/// An explicit path wins, then `XFER_CONFIG` (from the environment or a
/// `.env` file), then `xfer.toml` in the working directory.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/etc/xfer/prod.toml")));
        assert_eq!(path, PathBuf::from("/etc/xfer/prod.toml"));
    }
}
