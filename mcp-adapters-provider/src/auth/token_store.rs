use std::path::{Path, PathBuf};

use super::credential::OAuthCredential;
use crate::error::{ProviderError, Result};

const PROVIDER: &str = "google-oauth";

/// JSON file holding the persisted [`OAuthCredential`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored credential. `Ok(None)` when no token file exists yet.
    pub async fn load(&self) -> Result<Option<OAuthCredential>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(&e)),
        };
        let credential =
            serde_json::from_str(&raw).map_err(|e| ProviderError::ConfigError {
                path: self.path.display().to_string(),
                detail: format!("invalid token file: {e}"),
            })?;
        Ok(Some(credential))
    }

    /// Overwrite the token file, creating parent directories as needed.
    pub async fn save(&self, credential: &OAuthCredential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(&e))?;
        }
        let json = serde_json::to_string_pretty(credential).map_err(|e| {
            ProviderError::ParseError {
                provider: PROVIDER.to_string(),
                detail: e.to_string(),
            }
        })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(&e))?;
        log::debug!("[{PROVIDER}] Token persisted to {}", self.path.display());
        Ok(())
    }

    fn io_error(&self, e: &std::io::Error) -> ProviderError {
        ProviderError::IoError {
            provider: PROVIDER.to_string(),
            path: self.path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> OAuthCredential {
        OAuthCredential {
            token: "ya29.a".to_string(),
            refresh_token: Some("1//r".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            scopes: vec![],
            expiry: None,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_creates_parent_dirs_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/config/token.json"));

        store.save(&credential()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(credential()));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = TokenStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ProviderError::ConfigError { .. }), "{err:?}");
    }
}
