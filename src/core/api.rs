//! Client for the gasification analytics service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::instrument;

use super::error::{ApiError, Result};
use super::metrics::PredictionResult;
use super::params::{PredictionParameters, VisualizationSelection};
use super::wire::{self, PREDICT_PATH, SCATTER_HTML_PATH};

/// Operations the views need from the remote service.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// `POST /api/v1/predict-knn` with the form as JSON.
    async fn predict(&self, params: &PredictionParameters) -> Result<PredictionResult>;

    /// `GET /api/v1/viz/scatter/html` returning a complete HTML document.
    async fn scatter_html(&self, selection: &VisualizationSelection) -> Result<String>;
}

/// [`AnalyticsApi`] over HTTP.
#[derive(Clone)]
pub struct HttpAnalyticsClient {
    client: Client,
    base_url: String,
}

impl HttpAnalyticsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsClient {
    #[instrument(skip(self, params), fields(base = %self.base_url))]
    async fn predict(&self, params: &PredictionParameters) -> Result<PredictionResult> {
        let body = wire::prediction_body(params)?;
        let url = wire::endpoint(&self.base_url, PREDICT_PATH);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "prediction rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[instrument(skip(self, selection), fields(base = %self.base_url))]
    async fn scatter_html(&self, selection: &VisualizationSelection) -> Result<String> {
        let query = wire::scatter_query(selection)?;
        let url = format!("{}?{query}", wire::endpoint(&self.base_url, SCATTER_HTML_PATH));

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "scatter request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(bytes = html.len(), "scatter document received");
        Ok(html)
    }
}
