//! Pump Studio HTTP client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::MarketClient;
use super::types::{AnalysisPayload, AnalysisStats, MarketEnvelope, MarketToken, SubmitResult};
use crate::config::{AgentConfig, ConfigSource};
use crate::error::{AnalystError, Result};
use crate::model::Snapshot;

pub const DEFAULT_BASE_URL: &str = "https://api.pump.studio";

/// reqwest-backed Pump Studio API client.
///
/// The platform key is read from the [`ConfigSource`] on every request, so
/// key changes take effect without rebuilding the client.
pub struct PumpStudioClient {
    client: Client,
    base_url: String,
    config: Arc<dyn ConfigSource>,
}

impl PumpStudioClient {
    pub fn new(base_url: impl Into<String>, config: Arc<dyn ConfigSource>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AnalystError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Create from environment variables with a fixed configuration
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("PUMP_STUDIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let config = AgentConfig::from_env();
        Self::new(base_url, Arc::new(move || config.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach both auth headers when a key is configured
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.config.load().api_key;
        let key = key.trim();
        if key.is_empty() {
            request
        } else {
            request.header("X-API-Key", key).bearer_auth(key)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Pump Studio request failed");
            return Err(AnalystError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Deserialize)]
struct ContextEnvelope {
    #[serde(default)]
    context: Option<String>,
}

#[async_trait]
impl MarketClient for PumpStudioClient {
    async fn get_market(&self, tab: &str, limit: u32) -> Result<Vec<MarketToken>> {
        let envelope: MarketEnvelope = self
            .get_json(
                "/api/v1/market",
                &[("tab", tab.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.into_tokens())
    }

    async fn get_data_point(&self, mint: &str) -> Result<Snapshot> {
        self.get_json("/api/v1/datapoint", &[("mint", mint.to_string())])
            .await
    }

    async fn get_analysis_stats(&self, limit: u32) -> Result<AnalysisStats> {
        self.get_json("/api/v1/analysis", &[("limit", limit.to_string())])
            .await
    }

    async fn submit_analysis(&self, payload: &AnalysisPayload) -> Result<SubmitResult> {
        let request = self.authorize(
            self.client
                .post(self.url("/api/v1/analysis/submit"))
                .json(payload),
        );
        let response = request.send().await?;
        let result: SubmitResult = Self::read_json(response).await?;

        tracing::debug!(
            mint = %payload.mint,
            ok = result.ok,
            xp = result.xp_earned.unwrap_or(0),
            "Analysis submitted"
        );
        Ok(result)
    }

    async fn get_context(&self, mint: &str) -> Result<String> {
        let envelope: ContextEnvelope = self
            .get_json("/api/v1/chat/context", &[("mint", mint.to_string())])
            .await?;
        Ok(envelope.context.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "PumpStudio"
    }
}
