// src/config.rs

//! Configuration loading utilities.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Load configuration from `{base}/config.toml` and validate it.
///
/// A missing or unreadable file falls back to the built-in defaults; an
/// invalid configuration is an error.
pub fn load(base_path: &Path) -> Result<Config> {
    let config = Config::load_or_default(base_path.join("config.toml"));
    config
        .validate()
        .map_err(|e| AppError::config(format!("invalid configuration: {e}")))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load(tmp.path()).unwrap();
        assert!(!config.locators.is_empty());
    }

    #[test]
    fn partial_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[browser]\npage_timeout_secs = 15\n",
        )
        .unwrap();
        let config = load(tmp.path()).unwrap();
        assert_eq!(config.browser.page_timeout_secs, 15);
        assert_eq!(config.browser.login_timeout_secs, 20);
    }
}
