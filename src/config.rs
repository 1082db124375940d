//! Application configuration, loaded from `finboard.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_ENV: &str = "FINBOARD_CONFIG";
const CONFIG_FILE: &str = "finboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub currency_symbol: String,
    pub currency_code: String,
    pub session_timeout_hours: u64,
    pub rows_per_page: usize,
    /// SHA-256 hex digest of the dashboard password. `None` disables the
    /// login gate.
    pub password_sha256: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₵".to_string(),
            currency_code: "GHS".to_string(),
            session_timeout_hours: 8,
            rows_per_page: 25,
            password_sha256: None,
        }
    }
}

impl AppConfig {
    /// Load from `$FINBOARD_CONFIG` or `./finboard.json`.
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_hours * 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_file_is_missing() {
        let config = AppConfig::load_from(Path::new("/nonexistent/finboard.json")).unwrap();
        assert_eq!(config.currency_symbol, "₵");
        assert_eq!(config.session_timeout_hours, 8);
        assert_eq!(config.rows_per_page, 25);
        assert!(config.password_sha256.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"currency_symbol": "$", "rows_per_page": 50}"#)
            .unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.rows_per_page, 50);
        assert_eq!(config.currency_code, "GHS");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn timeout_converts_hours() {
        let config = AppConfig::default();
        assert_eq!(config.session_timeout(), Duration::from_secs(8 * 3600));
    }
}
