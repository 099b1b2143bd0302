//! Order store access.
//!
//! The store is a spreadsheet published as a web app. It returns every row
//! on GET and applies one edit per POST. This module hides the transport
//! behind [`OrderStore`] so the dashboard can run against a mock.

use async_trait::async_trait;
use serde_json::Value;

use crate::edit::{EditPayload, StoreReply};

pub mod http;
pub mod mock;

pub use http::HttpOrderStore;
pub use mock::MockOrderStore;

/// Errors talking to the order store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status.
    #[error("store returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the JSON we expected.
    #[error("malformed store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store is unreachable (used by test doubles).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Access to the remote order sheet.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch every row as the store returns it.
    async fn fetch_rows(&self) -> Result<Value, StoreError>;

    /// Submit one edit. A reply is returned for both accepted and refused
    /// edits; `Err` means the store could not be asked.
    async fn submit(&self, payload: &EditPayload) -> Result<StoreReply, StoreError>;

    /// Store name for logging.
    fn name(&self) -> &str;
}
