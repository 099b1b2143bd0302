//! HTTP client for the spreadsheet web app.
//!
//! GETs the row set and POSTs edits as JSON to the same endpoint. No
//! retries: a failed edit is reported and left for the operator to resend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{OrderStore, StoreError};
use crate::config::StoreConfig;
use crate::edit::{EditPayload, StoreReply};

/// Longest slice of an error body kept in [`StoreError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

/// First [`ERROR_BODY_LIMIT`] characters of an error body.
fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

/// Order store reached over HTTP.
pub struct HttpOrderStore {
    client: Client,
    config: StoreConfig,
}

impl HttpOrderStore {
    /// Create a store client with the given configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(StoreError::Http)?;

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, StoreError> {
        let config = StoreConfig::from_env().map_err(|e| StoreError::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn with_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }
        request
    }

    /// Body of a successful response, or a status error.
    ///
    /// Content type is ignored; spreadsheet web apps often label JSON as
    /// `text/plain`.
    async fn read_body(&self, response: Response) -> Result<String, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let body = truncate_body(&response.text().await.unwrap_or_default());
        error!(
            endpoint = %self.config.endpoint,
            status = %status,
            body = %body,
            "Order store request failed"
        );
        Err(StoreError::Status { status, body })
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn fetch_rows(&self) -> Result<Value, StoreError> {
        let request = self.with_headers(self.client.get(&self.config.endpoint));
        let response = request.send().await?;
        let body = self.read_body(response).await?;

        let rows: Value = serde_json::from_str(&body).map_err(|e| {
            warn!(
                endpoint = %self.config.endpoint,
                error = %e,
                "Order store returned malformed JSON"
            );
            StoreError::Decode(e)
        })?;

        debug!(
            endpoint = %self.config.endpoint,
            rows = ?rows.as_array().map(Vec::len),
            "Fetched order rows"
        );
        Ok(rows)
    }

    async fn submit(&self, payload: &EditPayload) -> Result<StoreReply, StoreError> {
        let request = self.with_headers(self.client.post(&self.config.endpoint).json(payload));
        let response = request.send().await?;
        let body = self.read_body(response).await?;

        let reply: StoreReply = serde_json::from_str(&body)?;
        debug!(
            endpoint = %self.config.endpoint,
            order_id = %payload.order_id,
            status = %reply.status,
            "Order store answered edit"
        );
        Ok(reply)
    }

    fn name(&self) -> &str {
        "http"
    }
}
