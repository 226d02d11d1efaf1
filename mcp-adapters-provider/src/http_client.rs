//! Generic HTTP client tools
//!
//! Reusable request processing shared by the Drive and Weather clients. Each client
//! builds its own `RequestBuilder` (auth header vs. query key, JSON vs. multipart body)
//! and hands it here for sending, logging and status handling.
//!
//! Every request is a single attempt. Transient failures (timeouts, 429, 5xx gateway
//! errors) are classified but never retried.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and returns the raw response.
    ///
    /// Transport failures are mapped to `Timeout` / `NetworkError`, and HTTP 429 to
    /// `RateLimited`. Any other status is returned to the caller untouched so that it can
    /// decide how to read the body (text, JSON, or a chunked media stream).
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - provider label (for logs and errors)
    /// * `method_name` - HTTP method (for logs)
    /// * `url_for_log` - URL with secrets already redacted
    pub async fn send(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_for_log: &str,
    ) -> Result<Response, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_for_log}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        if status_code == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        Ok(response)
    }

    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// Gateway errors (502/503/504) are reported as `NetworkError` since their bodies
    /// are HTML pages from a proxy rather than API error payloads.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_for_log: &str,
    ) -> Result<(u16, String), ProviderError> {
        let response = Self::send(request_builder, provider_name, method_name, url_for_log).await?;
        let status_code = response.status().as_u16();

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = Self::read_text(response, provider_name).await?;
        Ok((status_code, response_text))
    }

    /// Reads the full response body as text.
    pub async fn read_text(response: Response, provider_name: &str) -> Result<String, ProviderError> {
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }

    /// Reads a response body chunk by chunk until the stream signals completion.
    ///
    /// Nothing is returned before the final chunk has arrived; a failure mid-stream
    /// discards the partial buffer.
    pub async fn read_chunks(
        mut response: Response,
        provider_name: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let mut buffer = Vec::new();
        let mut chunks = 0_usize;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    chunks += 1;
                    buffer.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) if e.is_timeout() => {
                    return Err(ProviderError::Timeout {
                        provider: provider_name.to_string(),
                        detail: e.to_string(),
                    });
                }
                Err(e) => {
                    return Err(ProviderError::NetworkError {
                        provider: provider_name.to_string(),
                        detail: format!("Download interrupted after {} bytes: {e}", buffer.len()),
                    });
                }
            }
        }

        log::debug!(
            "[{provider_name}] Received {} bytes in {chunks} chunk(s)",
            buffer.len()
        );
        Ok(buffer)
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
