//! Configuration management for Postern.
//!
//! Loads configuration from ${POSTERN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::routes::Route;

pub mod paths {
    //! Path resolution for Postern configuration and data directories.
    //!
    //! POSTERN_HOME resolution order:
    //! 1. POSTERN_HOME environment variable (if set)
    //! 2. ~/.config/postern (default)

    use std::path::PathBuf;

    /// Returns the Postern home directory.
    ///
    /// Checks POSTERN_HOME env var first, falls back to ~/.config/postern
    pub fn postern_home() -> PathBuf {
        if let Ok(home) = std::env::var("POSTERN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("postern"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        postern_home().join("config.toml")
    }

    /// Returns the path to the persisted session record.
    pub fn session_path() -> PathBuf {
        postern_home().join("session.json")
    }

    /// Returns the directory diagnostic log files are written to.
    pub fn logs_dir() -> PathBuf {
        postern_home().join("logs")
    }
}

/// Postern configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the account service (revocation endpoint, sign-in pages).
    pub account_url: String,

    /// Whether signing out revokes the token server-side before clearing the
    /// local record. Disable for offline use.
    pub revoke_on_sign_out: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_url: Self::DEFAULT_ACCOUNT_URL.to_string(),
            revoke_on_sign_out: true,
        }
    }
}

impl Config {
    const DEFAULT_ACCOUNT_URL: &str = "https://account.postern.dev";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// URL of the account service's sign-in page.
    pub fn sign_in_url(&self) -> String {
        format!(
            "{}{}",
            self.account_url.trim_end_matches('/'),
            Route::SignIn.as_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.account_url, Config::DEFAULT_ACCOUNT_URL);
        assert!(config.revoke_on_sign_out);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "account_url = \"https://accounts.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.account_url, "https://accounts.example.com");
        assert!(config.revoke_on_sign_out);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "account_url = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_sign_in_url_joins_cleanly() {
        let config = Config {
            account_url: "https://accounts.example.com/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.sign_in_url(), "https://accounts.example.com/signin");
    }
}
