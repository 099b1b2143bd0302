//! Order lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an order, in the order it moves through the workshop.
///
/// The store accepts any text in its status column; this type covers the
/// four labels the dispatch team uses. Edits may only submit one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Confirmed")]
    Confirmed,
    #[serde(rename = "Manufacturing Stage 1")]
    ManufacturingStage1,
    #[serde(rename = "Manufacturing Stage 2")]
    ManufacturingStage2,
    #[serde(rename = "Dispatched")]
    Dispatched,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 4] = [
        Status::Confirmed,
        Status::ManufacturingStage1,
        Status::ManufacturingStage2,
        Status::Dispatched,
    ];

    /// Label as written in the order sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::ManufacturingStage1 => "Manufacturing Stage 1",
            Self::ManufacturingStage2 => "Manufacturing Stage 2",
            Self::Dispatched => "Dispatched",
        }
    }

    /// The following lifecycle step, `None` once dispatched.
    pub fn next(&self) -> Option<Status> {
        match self {
            Self::Confirmed => Some(Self::ManufacturingStage1),
            Self::ManufacturingStage1 => Some(Self::ManufacturingStage2),
            Self::ManufacturingStage2 => Some(Self::Dispatched),
            Self::Dispatched => None,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status text that is not one of the lifecycle labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected one of: Confirmed, Manufacturing Stage 1, Manufacturing Stage 2, Dispatched)")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
