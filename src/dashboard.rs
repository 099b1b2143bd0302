//! Dashboard session.
//!
//! Holds the record set for one session and turns every store interaction
//! into a user-facing [`Notice`]. Nothing here returns an error: fetch and
//! save failures are reported, never raised.
//!
//! The session set only changes on [`Dashboard::load`]. A save does not
//! patch it; reload to see what the store committed.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::edit::EditRequest;
use crate::model::{OrderId, OrderRecord};
use crate::normalize::{normalize_payload, Normalized};
use crate::store::OrderStore;
use crate::view::{self, Section, SectionCounts};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Records now in the session.
    pub count: usize,
    /// Rows skipped during normalization.
    pub dropped: usize,
    /// Warning for the operator, if anything went wrong.
    pub notice: Option<Notice>,
}

/// Result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The store committed the edit.
    Saved { order_id: OrderId },
    /// The store answered but refused the edit.
    Rejected { order_id: OrderId, message: String },
    /// The edit never reached a store decision.
    Failed { order_id: OrderId, error: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Saved { order_id }
            | Self::Rejected { order_id, .. }
            | Self::Failed { order_id, .. } => order_id,
        }
    }

    /// Message for the operator. A store refusal is shown verbatim.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Saved { order_id } => {
                Notice::success(format!("Order {} updated successfully", order_id))
            }
            Self::Rejected { message, .. } => Notice::error(message.clone()),
            Self::Failed { order_id, error } => {
                Notice::error(format!("Failed to update order {}: {}", order_id, error))
            }
        }
    }
}

/// One operator session against an order store.
pub struct Dashboard {
    store: Arc<dyn OrderStore>,
    records: Vec<OrderRecord>,
}

impl Dashboard {
    /// Empty session; call [`Dashboard::load`] to fetch.
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    /// Replace the session set with the store's current rows.
    ///
    /// Any failure leaves the session empty and is reported as a warning.
    pub async fn load(&mut self) -> LoadReport {
        self.records.clear();

        let payload = match self.store.fetch_rows().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(store = %self.store.name(), error = %e, "Failed to fetch orders");
                return LoadReport {
                    count: 0,
                    dropped: 0,
                    notice: Some(Notice::warning(format!(
                        "Could not load orders from the store: {}",
                        e
                    ))),
                };
            }
        };

        let normalized = match normalize_payload(&payload) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(store = %self.store.name(), error = %e, "Unusable order payload");
                return LoadReport {
                    count: 0,
                    dropped: 0,
                    notice: Some(Notice::warning(format!("No orders to show: {}", e))),
                };
            }
        };

        let dropped = normalized.dropped;
        let notice = (dropped > 0).then(|| Notice::warning(skipped_rows_text(&normalized)));
        self.records = normalized.records;
        info!(
            store = %self.store.name(),
            count = self.records.len(),
            dropped,
            "Loaded orders"
        );
        LoadReport {
            count: self.records.len(),
            dropped,
            notice,
        }
    }

    /// Records in store order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn section(&self, section: Section) -> Vec<&OrderRecord> {
        view::partition(&self.records, section)
    }

    pub fn counts(&self) -> SectionCounts {
        view::section_counts(&self.records)
    }

    pub fn record(&self, order_id: &OrderId) -> Option<&OrderRecord> {
        view::find(&self.records, order_id)
    }

    /// Submit one edit as a single POST.
    ///
    /// Only orders present in the session can be edited.
    pub async fn save(&self, request: EditRequest) -> SaveOutcome {
        let order_id = match self.record(&request.order_id) {
            Some(record) => record.order_id.clone(),
            None => {
                warn!(order_id = %request.order_id, "Save for order not in session");
                return SaveOutcome::Failed {
                    order_id: request.order_id,
                    error: "unknown order".to_string(),
                };
            }
        };

        let mut payload = request.to_payload();
        payload.order_id = order_id.clone();

        match self.store.submit(&payload).await {
            Ok(reply) if reply.is_success() => {
                info!(order_id = %order_id, status = %payload.status, "Order updated");
                SaveOutcome::Saved { order_id }
            }
            Ok(reply) => {
                let message = reply.failure_message();
                warn!(order_id = %order_id, message = %message, "Store refused edit");
                SaveOutcome::Rejected { order_id, message }
            }
            Err(e) => {
                error!(order_id = %order_id, error = %e, "Failed to submit edit");
                SaveOutcome::Failed {
                    order_id,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Warning text for rows left out of a load, split by reason.
fn skipped_rows_text(normalized: &Normalized) -> String {
    fn rows(n: usize) -> String {
        format!("{} row{}", n, if n == 1 { "" } else { "s" })
    }

    let mut parts = Vec::new();
    if normalized.missing_id() > 0 {
        parts.push(format!(
            "Skipped {} without a usable order id",
            rows(normalized.missing_id())
        ));
    }
    if normalized.not_objects > 0 {
        parts.push(match normalized.not_objects {
            1 => "Skipped 1 row that was not a JSON object".to_string(),
            n => format!("Skipped {} that were not JSON objects", rows(n)),
        });
    }
    parts.join("; ")
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("store", &self.store.name())
            .field("records", &self.records.len())
            .finish()
    }
}
