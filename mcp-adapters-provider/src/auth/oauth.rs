//! OAuth2 token endpoint client (Google flavour): consent URL construction, PKCE,
//! authorization-code exchange and refresh.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::credential::OAuthCredential;
use crate::config::ClientSecretEntry;
use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

/// Scope requested by the Drive adapter: files created or opened by this app.
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

const PROVIDER: &str = "google-oauth";
const PKCE_VERIFIER_LEN: usize = 64;
const STATE_LEN: usize = 32;

/// PKCE verifier/challenge pair (S256).
#[derive(Clone)]
pub(crate) struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        Self::from_verifier(random_string(PKCE_VERIFIER_LEN))
    }

    pub fn from_verifier(verifier: String) -> Self {
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

/// Random `state` value for CSRF protection of the redirect.
pub(crate) fn random_state() -> String {
    random_string(STATE_LEN)
}

fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Talks to the OAuth2 token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
}

impl OAuthClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Consent URL the user opens in a browser.
    pub(crate) fn authorization_url(
        &self,
        client: &ClientSecretEntry,
        redirect_uri: &str,
        state: &str,
        pkce: &Pkce,
        scopes: &[&str],
    ) -> Result<String> {
        let mut url = url::Url::parse(&client.auth_uri).map_err(|e| ProviderError::ConfigError {
            path: "auth_uri".to_string(),
            detail: format!("invalid authorization endpoint '{}': {e}", client.auth_uri),
        })?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &client.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &scopes.join(" "))
            .append_pair("state", state)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", "S256")
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");
        Ok(url.into())
    }

    /// Trade an authorization code for a fresh credential.
    pub async fn exchange_code(
        &self,
        client: &ClientSecretEntry,
        code: &str,
        redirect_uri: &str,
        code_verifier: &str,
        scopes: &[&str],
    ) -> Result<OAuthCredential> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("code_verifier", code_verifier),
        ];
        let response = self.post_token(&client.token_uri, &form).await?;

        let granted_scopes = response.scope.as_deref().map_or_else(
            || scopes.iter().map(ToString::to_string).collect(),
            split_scopes,
        );
        Ok(OAuthCredential {
            token: response.access_token,
            refresh_token: response.refresh_token,
            token_uri: client.token_uri.clone(),
            client_id: client.client_id.clone(),
            client_secret: client.client_secret.clone(),
            scopes: granted_scopes,
            expiry: response
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }

    /// Refresh an expired credential via its own `token_uri`.
    ///
    /// The refresh token is kept unless the endpoint rotates it.
    pub async fn refresh(&self, credential: &OAuthCredential) -> Result<OAuthCredential> {
        let Some(refresh_token) = credential.refresh_token.as_deref() else {
            return Err(ProviderError::InvalidCredentials {
                provider: PROVIDER.to_string(),
                raw_message: Some("no refresh token available".to_string()),
            });
        };
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
        ];
        let response = self.post_token(&credential.token_uri, &form).await?;

        let mut refreshed = credential.clone();
        refreshed.token = response.access_token;
        refreshed.expiry = response
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        if let Some(rotated) = response.refresh_token {
            refreshed.refresh_token = Some(rotated);
        }
        if let Some(scope) = response.scope.as_deref() {
            refreshed.scopes = split_scopes(scope);
        }
        log::info!("[{PROVIDER}] Access token refreshed");
        Ok(refreshed)
    }

    async fn post_token(&self, token_uri: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let request = self.http.post(token_uri).form(form);
        let (status, body) = HttpUtils::execute_request(request, PROVIDER, "POST", token_uri).await?;

        if (200..300).contains(&status) {
            return HttpUtils::parse_json(&body, PROVIDER);
        }

        let raw = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => RawApiError::with_code(
                err.error.clone(),
                err.error_description.unwrap_or(err.error),
            ),
            Err(_) => RawApiError::new(format!("HTTP {status}")),
        };
        Err(self.map_error(raw, ErrorContext::for_status(status)))
    }
}

fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(ToString::to_string).collect()
}

impl ProviderErrorMapper for OAuthClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("invalid_grant" | "invalid_client" | "unauthorized_client") => {
                ProviderError::InvalidCredentials {
                    provider: PROVIDER.to_string(),
                    raw_message: Some(raw.message),
                }
            }
            Some("invalid_request" | "invalid_scope" | "unsupported_grant_type") => {
                ProviderError::AuthorizationFailed {
                    provider: PROVIDER.to_string(),
                    detail: raw.message,
                }
            }
            _ if context.status == Some(401) => ProviderError::InvalidCredentials {
                provider: PROVIDER.to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
