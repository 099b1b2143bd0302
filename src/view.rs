//! Section partitioning of the record set.
//!
//! The dashboard has three fixed sections. Each is a filter over the
//! session's records; store order is kept within every section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{OrderId, OrderRecord};

/// Navigation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Manufacturing,
    Dispatch,
}

impl Section {
    /// Sections in navigation order.
    pub const ALL: [Section; 3] = [Section::Summary, Section::Manufacturing, Section::Dispatch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Manufacturing => "manufacturing",
            Self::Dispatch => "dispatch",
        }
    }

    /// Section header.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Order Summary",
            Self::Manufacturing => "Manufacturing",
            Self::Dispatch => "Dispatch",
        }
    }

    /// Whether a record belongs in this section.
    ///
    /// Manufacturing holds everything not yet dispatched, including records
    /// with a missing or unrecognized status.
    pub fn includes(&self, record: &OrderRecord) -> bool {
        match self {
            Self::Summary => true,
            Self::Manufacturing => !record.is_dispatched(),
            Self::Dispatch => record.is_dispatched(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}' (expected summary, manufacturing or dispatch)")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Records shown under `section`, in store order.
pub fn partition(records: &[OrderRecord], section: Section) -> Vec<&OrderRecord> {
    records.iter().filter(|r| section.includes(r)).collect()
}

/// Per-section record counts for the navigation header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub summary: usize,
    pub manufacturing: usize,
    pub dispatch: usize,
}

impl SectionCounts {
    pub fn get(&self, section: Section) -> usize {
        match section {
            Section::Summary => self.summary,
            Section::Manufacturing => self.manufacturing,
            Section::Dispatch => self.dispatch,
        }
    }
}

pub fn section_counts(records: &[OrderRecord]) -> SectionCounts {
    records
        .iter()
        .fold(SectionCounts::default(), |mut counts, record| {
            counts.summary += 1;
            if record.is_dispatched() {
                counts.dispatch += 1;
            } else {
                counts.manufacturing += 1;
            }
            counts
        })
}

/// First record whose id matches `order_id`.
pub fn find<'a>(records: &'a [OrderRecord], order_id: &OrderId) -> Option<&'a OrderRecord> {
    records.iter().find(|r| r.order_id.matches(order_id))
}
