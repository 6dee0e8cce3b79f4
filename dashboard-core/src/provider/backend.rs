use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::model::WeatherSnapshot;

use super::{FetchError, WeatherSource};

/// Client for the dashboard backend's `/api/weather` endpoint.
#[derive(Debug, Clone)]
pub struct BackendSource {
    base: String,
    http: Client,
}

impl BackendSource {
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        Url::parse(base).map_err(|e| anyhow!("Invalid API base URL '{base}': {e}"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[async_trait]
impl WeatherSource for BackendSource {
    #[instrument(skip(self), fields(base = %self.base))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let res = self
            .http
            .get(self.endpoint("/api/weather"))
            .query(&[("city", city)])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to reach weather backend: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read weather response body: {e}")))?;

        debug!(status = status.as_u16(), bytes = body.len(), "weather response received");

        if !status.is_success() {
            return Err(FetchError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    async fn is_healthy(&self) -> bool {
        let res = match self.http.get(self.endpoint("/health")).send().await {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                debug!(status = res.status().as_u16(), "health check returned non-success");
                return false;
            }
            Err(e) => {
                debug!(error = %e, "health check failed");
                return false;
            }
        };

        res.json::<HealthResponse>()
            .await
            .is_ok_and(|h| h.status == "ok")
    }
}
