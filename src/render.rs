//! Plain-text order cards.

use std::fmt;

use serde_json::Value;

use crate::model::{CanonicalField, FieldValue, OrderRecord};
use crate::view::Section;

/// Card header, `Order <id> - <customer>`.
pub fn heading(record: &OrderRecord) -> String {
    match record.customer_name.as_deref() {
        Some(customer) => format!("Order {} - {}", record.order_id, customer),
        None => format!("Order {}", record.order_id),
    }
}

pub fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One record as a block of `label: value` lines.
///
/// Fields follow the order sheet's column order; unmapped columns come last.
pub struct Card<'a>(pub &'a OrderRecord);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        writeln!(f, "{}", heading(record))?;

        for field in CanonicalField::ALL {
            let value = match record.field(field) {
                None | Some(FieldValue::Id(_)) => continue,
                Some(FieldValue::Text(text)) => text.to_string(),
                Some(FieldValue::Amount(value)) => amount(value),
            };
            writeln!(f, "  {}: {}", field.label(), value)?;
        }
        if let Some(balance) = record.balance_due() {
            writeln!(f, "  Balance due: {}", amount(balance))?;
        }
        for (key, value) in &record.extra {
            writeln!(f, "  {}: {}", key, cell(value))?;
        }
        Ok(())
    }
}

/// A section header followed by its cards.
pub struct SectionListing<'a> {
    pub section: Section,
    pub records: &'a [&'a OrderRecord],
}

impl fmt::Display for SectionListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.section.title(), self.records.len())?;
        for record in self.records {
            write!(f, "\n{}", Card(record))?;
        }
        Ok(())
    }
}

pub fn card(record: &OrderRecord) -> String {
    Card(record).to_string()
}

pub fn section(section: Section, records: &[&OrderRecord]) -> String {
    SectionListing { section, records }.to_string()
}
