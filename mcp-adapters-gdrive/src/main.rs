//! MCP server entry point for the Google Drive adapter
//!
//! Serves `list_files`, `upload_file`, `download_file` and `delete_file` over stdio.
//!
//! # Credentials
//!
//! OAuth client secrets are read from `gdrive_credentials.json` and the user token is kept in
//! `token.json`, both under the config directory (`MCP_ADAPTERS_CONFIG_DIR`, defaulting
//! to `./config`). The first tool call without a usable token opens the
//! consent flow on a loopback redirect.

mod schemas;
mod tools;

use std::process::ExitCode;
use std::sync::Arc;

use mcp_adapters_core::{AdapterServer, ServerIdentity};
use mcp_adapters_provider::{
    AdapterConfig, DRIVE_FILE_SCOPE, DriveClient, LocalServerFlow, OAuthClient,
    OAuthCredentialProvider, TokenStore, create_http_client,
};
use rmcp::ServiceExt;
use tools::DriveTools;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVER_NAME: &str = "gdrive-server";
const INSTRUCTIONS: &str = "Google Drive file operations. Files are addressed by Drive \
     file id; use list_files to find ids before downloading or deleting.";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Google Drive MCP server...");

    let config = AdapterConfig::from_env();
    tracing::info!("Config directory: {}", config.config_dir.display());

    let http = match create_http_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let oauth = OAuthClient::new(http.clone());
    let flow = LocalServerFlow::new(
        config.client_secrets_path(),
        oauth.clone(),
        vec![DRIVE_FILE_SCOPE],
    );
    let credentials = OAuthCredentialProvider::new(
        TokenStore::new(config.token_path()),
        oauth,
        Arc::new(flow),
    );

    let tools = DriveTools::from_client(Arc::new(credentials), DriveClient::new(http));
    let mcp_server = AdapterServer::new(
        Arc::new(tools),
        ServerIdentity {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: INSTRUCTIONS.to_string(),
        },
    );

    tracing::info!("Google Drive server ready for MCP connections");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
