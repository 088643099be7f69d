use crate::{Result, SpotifyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Spotify application credentials for the client-credentials flow.
///
/// Credentials never live in the repository. They are read from the
/// `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` environment variables or, failing
/// that, from `~/.config/artist-stats/credentials.json`:
///
/// ```json
/// { "client_id": "...", "client_secret": "..." }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from the environment, falling back to the XDG config file.
    pub fn load() -> Result<Self> {
        if let Some(credentials) = Self::from_vars(|name| std::env::var(name).ok()) {
            log::debug!("Using credentials from environment");
            return Ok(credentials);
        }

        let path = Self::credentials_path()?;
        if !path.exists() {
            return Err(SpotifyError::Config(format!(
                "{CLIENT_ID_VAR}/{CLIENT_SECRET_VAR} not set and no credentials file at {}",
                path.display()
            )));
        }
        Self::load_file(&path)
    }

    /// Build credentials from a variable lookup; both variables must be present and non-empty.
    pub fn from_vars<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(CLIENT_ID_VAR).filter(|v| !v.is_empty())?;
        let client_secret = lookup(CLIENT_SECRET_VAR).filter(|v| !v.is_empty())?;
        Some(Self::new(client_id, client_secret))
    }

    /// Get the credentials file path: `~/.config/artist-stats/credentials.json`.
    pub fn credentials_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SpotifyError::Config("Cannot determine XDG config directory".to_string())
        })?;

        Ok(config_dir.join("artist-stats").join("credentials.json"))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SpotifyError::Config(format!(
                "Failed to read credentials file {}: {e}",
                path.display()
            ))
        })?;

        let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
            SpotifyError::Config(format!(
                "Failed to parse credentials file {}: {e}",
                path.display()
            ))
        })?;

        log::debug!("Credentials loaded from: {}", path.display());
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn from_vars_requires_both() {
        let vars: HashMap<&str, String> = [(CLIENT_ID_VAR, "id".to_string())].into();
        assert!(Credentials::from_vars(|k| vars.get(k).cloned()).is_none());

        let vars: HashMap<&str, String> = [
            (CLIENT_ID_VAR, "id".to_string()),
            (CLIENT_SECRET_VAR, "secret".to_string()),
        ]
        .into();
        assert_eq!(
            Credentials::from_vars(|k| vars.get(k).cloned()),
            Some(Credentials::new("id", "secret"))
        );
    }

    #[test]
    fn empty_values_are_ignored() {
        assert!(Credentials::from_vars(|_| Some(String::new())).is_none());
    }

    #[test]
    fn load_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"client_id": "abc", "client_secret": "xyz"}"#).unwrap();

        let credentials = Credentials::load_file(&path).unwrap();
        assert_eq!(credentials, Credentials::new("abc", "xyz"));
    }

    #[test]
    fn load_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "client_id=abc").unwrap();

        assert!(matches!(
            Credentials::load_file(&path),
            Err(SpotifyError::Config(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", Credentials::new("abc", "xyz"));
        assert!(rendered.contains("abc"));
        assert!(!rendered.contains("xyz"));
    }
}
