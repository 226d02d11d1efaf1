use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::default_token_uri;
use crate::utils::log_sanitizer::redact_secret;

/// A token is treated as expired this long before its actual expiry.
pub(crate) const EXPIRY_SKEW_SECS: i64 = 60;

/// OAuth2 user credential in Google's "authorized user" JSON shape.
///
/// This is exactly what lands in `token.json`, so a file written by other Google
/// tooling can be picked up as is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredential {
    /// Access token sent as `Authorization: Bearer`.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Absolute expiry of `token`. `None` means the token never expires locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl OAuthCredential {
    /// Expired at `now`, counting the skew.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_some_and(|expiry| now + Duration::seconds(EXPIRY_SKEW_SECS) >= expiry)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Usable right now: has an access token and is not expired.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && !self.is_expired()
    }

    /// Has a refresh token to trade for a new access token.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for OAuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredential")
            .field("token", &redact_secret(&self.token))
            .field(
                "refresh_token",
                &self.refresh_token.as_deref().map(redact_secret),
            )
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact_secret(&self.client_secret))
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}
