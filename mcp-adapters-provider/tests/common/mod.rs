//! Shared fixtures for the client tests.

#![allow(dead_code)]

use std::time::Duration;

use httpmock::MockServer;
use mcp_adapters_provider::{
    DriveClient, OAuthCredential, WeatherClient, WeatherConfig, create_http_client,
};

pub const ACCESS_TOKEN: &str = "ya29.test-access-token";
pub const API_KEY: &str = "test-api-key";

/// A credential that stays valid for the duration of a test.
pub fn credential() -> OAuthCredential {
    OAuthCredential {
        token: ACCESS_TOKEN.to_string(),
        refresh_token: None,
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scopes: vec![],
        expiry: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
    }
}

pub fn drive_client(server: &MockServer) -> DriveClient {
    let http = create_http_client(Duration::from_secs(5)).unwrap();
    DriveClient::with_base_urls(http, server.base_url(), server.base_url())
}

pub fn weather_client() -> WeatherClient {
    WeatherClient::new(create_http_client(Duration::from_secs(5)).unwrap())
}

pub fn weather_config(server: &MockServer) -> WeatherConfig {
    WeatherConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("{}/v1", server.base_url()),
        timeout: 5.0,
    }
}
