//! Credential sources: OAuth2 for Google Drive, a static API key for WeatherAPI.

mod credential;
mod flow;
mod oauth;
mod provider;
mod static_key;
mod token_store;

pub use credential::OAuthCredential;
pub use flow::{AuthorizationFlow, LocalServerFlow};
pub use oauth::{DRIVE_FILE_SCOPE, OAuthClient};
pub use provider::OAuthCredentialProvider;
pub use static_key::StaticKeyProvider;
pub use token_store::TokenStore;
