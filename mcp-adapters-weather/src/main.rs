//! MCP server entry point for the weather adapter
//!
//! Serves `get_current_weather` and `get_weather_forecast` over stdio, backed by
//! WeatherAPI.com. The API key lives in `weather_config.json` under the config
//! directory and is read on the first tool call, so the server starts even when the
//! file is missing.

mod schemas;
mod tools;

use std::process::ExitCode;
use std::sync::Arc;

use mcp_adapters_core::{AdapterServer, ServerIdentity};
use mcp_adapters_provider::{AdapterConfig, StaticKeyProvider, WeatherClient, create_http_client};
use rmcp::ServiceExt;
use tools::WeatherTools;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVER_NAME: &str = "weather-server";
const INSTRUCTIONS: &str = "Current conditions and multi-day forecasts. Locations may be \
     city names or \"lat,lon\" coordinates.";

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

    tracing::info!("Starting weather MCP server...");

    let config = AdapterConfig::from_env();
    let config_path = config.weather_config_path();
    if !config_path.exists() {
        tracing::warn!(
            "Weather config not found at {}; tool calls will fail until it exists",
            config_path.display()
        );
    }

    // Per-request timeouts come from the weather config; this one only bounds the client.
    let http = match create_http_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tools = WeatherTools::new(
        Arc::new(StaticKeyProvider::new(config_path)),
        Arc::new(WeatherClient::new(http)),
    );
    let mcp_server = AdapterServer::new(
        Arc::new(tools),
        ServerIdentity {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: INSTRUCTIONS.to_string(),
        },
    );

    tracing::info!("Weather server ready for MCP connections");
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
