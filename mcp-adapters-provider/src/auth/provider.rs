use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::credential::OAuthCredential;
use super::flow::AuthorizationFlow;
use super::oauth::OAuthClient;
use super::token_store::TokenStore;
use crate::error::Result;
use crate::traits::CredentialProvider;

/// OAuth2 credential source for the Drive adapter.
///
/// Resolution order: in-memory cache, token file, refresh, interactive consent.
/// Every newly obtained credential is written to the token file before it is
/// cached or returned.
pub struct OAuthCredentialProvider {
    store: TokenStore,
    oauth: OAuthClient,
    flow: Arc<dyn AuthorizationFlow>,
    cached: Mutex<Option<OAuthCredential>>,
}

impl OAuthCredentialProvider {
    pub fn new(store: TokenStore, oauth: OAuthClient, flow: Arc<dyn AuthorizationFlow>) -> Self {
        Self {
            store,
            oauth,
            flow,
            cached: Mutex::new(None),
        }
    }

    async fn persist(&self, credential: &OAuthCredential) -> Result<()> {
        self.store.save(credential).await
    }
}

#[async_trait]
impl CredentialProvider for OAuthCredentialProvider {
    type Credential = OAuthCredential;

    async fn ensure_credential(&self) -> Result<OAuthCredential> {
        // Held for the whole resolution so consent never runs twice.
        let mut cached = self.cached.lock().await;

        if let Some(credential) = cached.as_ref().filter(|c| c.is_valid()) {
            return Ok(credential.clone());
        }

        let stored = match cached.take() {
            Some(credential) => Some(credential),
            None => self.store.load().await?,
        };

        let credential = match stored {
            Some(credential) if credential.is_valid() => {
                log::debug!("Using stored token from {}", self.store.path().display());
                credential
            }
            Some(credential) if credential.can_refresh() => {
                log::info!("Stored token expired, refreshing");
                let refreshed = self.oauth.refresh(&credential).await?;
                self.persist(&refreshed).await?;
                refreshed
            }
            _ => {
                log::info!("No usable token, starting authorization flow");
                let fresh = self.flow.authorize().await?;
                self.persist(&fresh).await?;
                fresh
            }
        };

        *cached = Some(credential.clone());
        Ok(credential)
    }
}
