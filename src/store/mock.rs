//! Mock order store for testing.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{OrderStore, StoreError};
use crate::edit::{EditPayload, StoreReply};

/// In-memory order store double.
///
/// Serves canned rows, answers every edit with a canned reply, and records
/// what was submitted.
#[derive(Debug)]
pub struct MockOrderStore {
    rows: RwLock<Value>,
    reply: RwLock<StoreReply>,
    submitted: RwLock<Vec<EditPayload>>,
    fail_on_fetch: RwLock<bool>,
    fail_on_submit: RwLock<bool>,
}

impl Default for MockOrderStore {
    fn default() -> Self {
        Self::new(Value::Array(Vec::new()))
    }
}

impl MockOrderStore {
    pub fn new(rows: Value) -> Self {
        Self {
            rows: RwLock::new(rows),
            reply: RwLock::new(StoreReply::success()),
            submitted: RwLock::new(Vec::new()),
            fail_on_fetch: RwLock::new(false),
            fail_on_submit: RwLock::new(false),
        }
    }

    pub async fn set_rows(&self, rows: Value) {
        *self.rows.write().await = rows;
    }

    pub async fn set_reply(&self, reply: StoreReply) {
        *self.reply.write().await = reply;
    }

    pub async fn set_fail_on_fetch(&self, fail: bool) {
        *self.fail_on_fetch.write().await = fail;
    }

    pub async fn set_fail_on_submit(&self, fail: bool) {
        *self.fail_on_submit.write().await = fail;
    }

    pub async fn submitted_count(&self) -> usize {
        self.submitted.read().await.len()
    }

    pub async fn take_submitted(&self) -> Vec<EditPayload> {
        std::mem::take(&mut *self.submitted.write().await)
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn fetch_rows(&self) -> Result<Value, StoreError> {
        if *self.fail_on_fetch.read().await {
            return Err(StoreError::Unavailable("Mock fetch failure".to_string()));
        }
        Ok(self.rows.read().await.clone())
    }

    async fn submit(&self, payload: &EditPayload) -> Result<StoreReply, StoreError> {
        if *self.fail_on_submit.read().await {
            return Err(StoreError::Unavailable("Mock submit failure".to_string()));
        }
        self.submitted.write().await.push(payload.clone());
        Ok(self.reply.read().await.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
