//! Session lifecycle: the provider contract and the file-backed store.
//!
//! The UI consumes sessions through the `SessionProvider` trait and never
//! touches the record on disk itself. `SessionStore` is the production
//! implementation: a JSON record under the Postern home directory plus a
//! revocation call against the account service.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{Config, paths};

/// A signed-in session as persisted by the account service's login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Human-readable account label (usually an email address).
    pub account: String,
    /// Bearer token presented to the account service.
    pub access_token: String,
    /// Unix millis at which the session was established.
    pub created_at: i64,
}

impl SessionRecord {
    /// Returns the session creation time, if the stored millis are valid.
    pub fn signed_in_since(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
    }

    /// Returns a masked version of the token for display (first 8 chars + ...).
    pub fn masked_token(&self) -> String {
        if self.access_token.len() <= 12 {
            return "***".to_string();
        }
        format!("{}...", &self.access_token[..8])
    }
}

/// The provider's answer to "who is signed in right now".
///
/// `is_resolving` is true until the first async load settles (and again
/// while a post-sign-out refresh is outstanding); the UI renders a disabled
/// placeholder during that window instead of guessing.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub session: Option<SessionRecord>,
    pub is_resolving: bool,
}

impl SessionSnapshot {
    /// Snapshot for the window before the provider has answered.
    pub fn resolving() -> Self {
        Self {
            session: None,
            is_resolving: true,
        }
    }

    /// Snapshot for a settled answer.
    pub fn resolved(session: Option<SessionRecord>) -> Self {
        Self {
            session,
            is_resolving: false,
        }
    }
}

/// Read side and sign-out operation of the external session service.
///
/// `end_session` fails with an error on network failure or server rejection;
/// callers treat both identically.
pub trait SessionProvider: Send + Sync + 'static {
    /// Resolves whether a session currently exists.
    fn load(&self) -> impl Future<Output = Result<Option<SessionRecord>>> + Send;

    /// Ends the current session. The session record is gone afterwards.
    fn end_session(&self) -> impl Future<Output = Result<()>> + Send;
}

/// File-backed session provider talking to the account service.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    account_url: String,
    revoke_on_sign_out: bool,
    client: reqwest::Client,
}

impl SessionStore {
    /// Creates a store at the default session path.
    pub fn from_config(config: &Config) -> Self {
        Self::at(paths::session_path(), config)
    }

    /// Creates a store persisting to a specific path.
    pub fn at(path: PathBuf, config: &Config) -> Self {
        Self {
            path,
            account_url: config.account_url.trim_end_matches('/').to_string(),
            revoke_on_sign_out: config.revoke_on_sign_out,
            client: reqwest::Client::new(),
        }
    }

    /// Persists a session record, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory {}", parent.display())
            })?;
        }
        let contents =
            serde_json::to_string_pretty(record).context("Failed to serialize session record")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        Ok(())
    }

    /// Removes the session record. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        Ok(true)
    }

    fn read_record(path: &Path) -> Result<Option<SessionRecord>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        let record = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;
        Ok(Some(record))
    }

    /// Asks the account service to revoke a token.
    async fn revoke(&self, token: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/v1/session/revoke", self.account_url))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send sign-out request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sign-out rejected (HTTP {status}): {body}");
        }

        Ok(())
    }
}

impl SessionProvider for SessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        Self::read_record(&self.path)
    }

    async fn end_session(&self) -> Result<()> {
        let record = Self::read_record(&self.path)?.context("No session to end")?;
        if self.revoke_on_sign_out {
            self.revoke(&record.access_token).await?;
        }
        // The local record goes last: a failed revocation leaves the session
        // intact so the user can retry.
        self.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Config {
        Config {
            revoke_on_sign_out: false,
            ..Config::default()
        }
    }

    fn record() -> SessionRecord {
        SessionRecord {
            account: "pat@example.com".to_string(),
            access_token: "tok-1234567890abcdef".to_string(),
            created_at: 1_754_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_load_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"), &offline_config());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"), &offline_config());
        store.save(&record()).unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_clear_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"), &offline_config());
        store.save(&record()).unwrap();

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
    }

    #[tokio::test]
    async fn test_end_session_without_revocation_clears_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"), &offline_config());
        store.save(&record()).unwrap();

        store.end_session().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_end_session_without_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"), &offline_config());
        assert!(store.end_session().await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::at(path, &offline_config());
        assert!(store.load().await.is_err());
    }

    #[test]
    fn test_masked_token_keeps_prefix() {
        assert_eq!(record().masked_token(), "tok-1234...");

        let short = SessionRecord {
            access_token: "tiny".to_string(),
            ..record()
        };
        assert_eq!(short.masked_token(), "***");
    }
}
