//! Shared HTTP plumbing for hosted providers.

use std::time::Duration;

use agent_core::error::{AgentError, Result};
use reqwest::{Client, Response};

/// Build a reqwest client with the given request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AgentError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Resolve a sent request into its body text.
///
/// Transport failures become `ProviderUnavailable`, non-2xx statuses are
/// mapped through [`AgentError::from_status`] with the response body attached.
pub async fn read_body(response: reqwest::Result<Response>, provider: &str) -> Result<String> {
    let response = response.map_err(|e| {
        if e.is_timeout() {
            AgentError::ProviderUnavailable(format!("{} request timed out", provider))
        } else if e.is_connect() {
            AgentError::ProviderUnavailable(format!("{} connection failed: {}", provider, e))
        } else {
            AgentError::Provider(format!("{} request failed: {}", provider, e))
        }
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AgentError::Provider(format!("{} body read failed: {}", provider, e)))?;

    if !status.is_success() {
        return Err(AgentError::from_status(status.as_u16(), body));
    }

    Ok(body)
}
