//! Status edits and document attachments.
//!
//! An edit is one POST to the store: the new status plus, optionally, a PAN
//! card scan and a tracking proof. Attachments travel inline as base64 text
//! because the store speaks JSON only.

use std::fmt;
use std::path::Path;

use base64::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{OrderId, OrderRecord, Status};

/// Failure building an edit.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// File type outside the accepted set.
    #[error("unsupported attachment '{file_name}': expected a png, jpg or pdf file")]
    UnsupportedAttachment { file_name: String },

    /// Reading the attachment from disk failed.
    #[error("failed to read attachment '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The record holds a status outside the lifecycle labels, so there is
    /// no current value to keep.
    #[error("order {order_id} has status '{status}', which is not a lifecycle label; choose a status explicitly")]
    UnrecognizedStatus { order_id: OrderId, status: String },
}

/// Accepted attachment formats.
///
/// This is an input filter for the operator, not a content check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Png,
    Jpeg,
    Pdf,
}

impl AttachmentKind {
    /// Kind for a file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Kind for a file name, judged by its extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A document attached to one edit.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub kind: AttachmentKind,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// In-memory attachment; the file name decides the kind.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, EditError> {
        let file_name = file_name.into();
        let kind = AttachmentKind::from_file_name(&file_name)
            .ok_or_else(|| EditError::UnsupportedAttachment {
                file_name: file_name.clone(),
            })?;
        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    /// Read an attachment from disk.
    ///
    /// The extension is checked before the file is opened.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, EditError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if AttachmentKind::from_file_name(&file_name).is_none() {
            return Err(EditError::UnsupportedAttachment { file_name });
        }
        let bytes = tokio::fs::read(path).await.map_err(|source| EditError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(file_name, bytes)
    }

    /// Standard base64 with padding.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One requested edit, before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub order_id: OrderId,
    pub status: Status,
    pub pan_card: Option<Attachment>,
    pub tracking_doc: Option<Attachment>,
}

impl EditRequest {
    pub fn new(order_id: OrderId, status: Status) -> Self {
        Self {
            order_id,
            status,
            pan_card: None,
            tracking_doc: None,
        }
    }

    /// Edit pre-filled from a record.
    ///
    /// Keeps the record's current status. A record with no status starts
    /// from the first lifecycle step. Status text outside the lifecycle
    /// labels is refused rather than overwritten.
    pub fn for_record(record: &OrderRecord) -> Result<Self, EditError> {
        let status = match (record.status(), record.status.as_deref()) {
            (Some(status), _) => status,
            (None, None) => Status::Confirmed,
            (None, Some(raw)) => {
                return Err(EditError::UnrecognizedStatus {
                    order_id: record.order_id.clone(),
                    status: raw.to_string(),
                })
            }
        };
        Ok(Self::new(record.order_id.clone(), status))
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_pan_card(mut self, attachment: Attachment) -> Self {
        self.pan_card = Some(attachment);
        self
    }

    pub fn with_tracking_doc(mut self, attachment: Attachment) -> Self {
        self.tracking_doc = Some(attachment);
        self
    }

    /// Encode into the store's POST body.
    pub fn to_payload(&self) -> EditPayload {
        let encode = |attachment: &Option<Attachment>| {
            attachment
                .as_ref()
                .map(Attachment::to_base64)
                .unwrap_or_default()
        };
        EditPayload {
            order_id: self.order_id.clone(),
            status: self.status,
            pan_card_link: encode(&self.pan_card),
            tracking_doc_link: encode(&self.tracking_doc),
        }
    }
}

/// Wire body of a save.
///
/// Attachment fields are always present; an absent document is `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPayload {
    pub order_id: OrderId,
    pub status: Status,
    pub pan_card_link: String,
    pub tracking_doc_link: String,
}

/// Status value the store uses for a committed edit.
pub const STORE_SUCCESS: &str = "success";

/// Envelope returned by the store for a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReply {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoreReply {
    pub fn success() -> Self {
        Self {
            status: STORE_SUCCESS.to_string(),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STORE_SUCCESS
    }

    /// Message to show for a failed save.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "store reported failure without a message".to_string())
    }
}
