//! Column normalization for store rows.
//!
//! The order sheet has been copied between deployments and its headers have
//! drifted ("Order date" vs "Order Date", "Customer" vs "Customer name").
//! Every known spelling lives in [`COLUMN_ALIASES`]; rows are mapped through
//! it into [`OrderRecord`]s. Anything not in the table is kept verbatim.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::CanonicalField as F;
use crate::model::{CanonicalField, OrderId, OrderRecord, Slot};

/// Raw column name to canonical field.
///
/// Matching is exact on the trimmed header. Canonical names and the store's
/// POST field names map to themselves.
pub const COLUMN_ALIASES: &[(&str, CanonicalField)] = &[
    ("Order ID", F::OrderId),
    ("Order Id", F::OrderId),
    ("order_id", F::OrderId),
    ("orderId", F::OrderId),
    ("Customer name", F::CustomerName),
    ("Customer Name", F::CustomerName),
    ("Customer", F::CustomerName),
    ("customer_name", F::CustomerName),
    ("customerName", F::CustomerName),
    ("Customer phone", F::CustomerPhone),
    ("Customer Phone", F::CustomerPhone),
    ("Phone", F::CustomerPhone),
    ("Phone Number", F::CustomerPhone),
    ("customer_phone", F::CustomerPhone),
    ("customerPhone", F::CustomerPhone),
    ("Order date", F::OrderDate),
    ("Order Date", F::OrderDate),
    ("order_date", F::OrderDate),
    ("orderDate", F::OrderDate),
    ("Expected delivery date", F::ExpectedDeliveryDate),
    ("Expected Delivery Date", F::ExpectedDeliveryDate),
    ("expected_delivery_date", F::ExpectedDeliveryDate),
    ("expectedDeliveryDate", F::ExpectedDeliveryDate),
    ("Product type", F::ProductType),
    ("Product Type", F::ProductType),
    ("product_type", F::ProductType),
    ("productType", F::ProductType),
    ("Product link", F::ProductLink),
    ("Product Link", F::ProductLink),
    ("product_link", F::ProductLink),
    ("productLink", F::ProductLink),
    ("Customization", F::Customization),
    ("Customisation", F::Customization),
    ("Customization details", F::Customization),
    ("customization", F::Customization),
    ("Final price", F::FinalPrice),
    ("Final Price", F::FinalPrice),
    ("final_price", F::FinalPrice),
    ("finalPrice", F::FinalPrice),
    ("Initial paid amount", F::InitialPaid),
    ("Initial Paid Amount", F::InitialPaid),
    ("Initial paid", F::InitialPaid),
    ("initial_paid", F::InitialPaid),
    ("initialPaid", F::InitialPaid),
    ("Manufacturing cost", F::ManufacturingCost),
    ("Manufacturing Cost", F::ManufacturingCost),
    ("manufacturing_cost", F::ManufacturingCost),
    ("manufacturingCost", F::ManufacturingCost),
    ("Shipping cost", F::ShippingCost),
    ("Shipping Cost", F::ShippingCost),
    ("shipping_cost", F::ShippingCost),
    ("shippingCost", F::ShippingCost),
    ("Delivery location", F::DeliveryLocation),
    ("Delivery Location", F::DeliveryLocation),
    ("delivery_location", F::DeliveryLocation),
    ("deliveryLocation", F::DeliveryLocation),
    ("Delivery address", F::DeliveryAddress),
    ("Delivery Address", F::DeliveryAddress),
    ("Address", F::DeliveryAddress),
    ("delivery_address", F::DeliveryAddress),
    ("deliveryAddress", F::DeliveryAddress),
    ("Expected dispatch date", F::ExpectedDispatchDate),
    ("Expected Dispatch Date", F::ExpectedDispatchDate),
    ("expected_dispatch_date", F::ExpectedDispatchDate),
    ("expectedDispatchDate", F::ExpectedDispatchDate),
    ("Tracking doc link", F::TrackingDocLink),
    ("Tracking Doc Link", F::TrackingDocLink),
    ("Tracking document", F::TrackingDocLink),
    ("tracking_doc_link", F::TrackingDocLink),
    ("trackingDocLink", F::TrackingDocLink),
    ("PAN card link", F::PanCardLink),
    ("PAN Card Link", F::PanCardLink),
    ("PAN card", F::PanCardLink),
    ("pan_card_link", F::PanCardLink),
    ("panCardLink", F::PanCardLink),
    ("Status", F::Status),
    ("status", F::Status),
];

/// Canonical field for a raw column name, if the name is a known alias.
pub fn canonical_field(raw: &str) -> Option<CanonicalField> {
    let raw = raw.trim();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, field)| *field)
}

/// Why a single row was left out of the record set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowRejection {
    #[error("row is not a JSON object")]
    NotAnObject,

    #[error("row has no usable order id")]
    MissingOrderId,
}

/// Why a whole payload could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("expected a JSON array of rows, got {0}")]
    NotAnArray(&'static str),

    #[error("the order store returned no rows")]
    Empty,
}

/// Records produced from one payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Records in store order.
    pub records: Vec<OrderRecord>,
    /// Rows that were skipped.
    pub dropped: usize,
    /// Skipped rows that were not JSON objects. The rest lacked an order id.
    pub not_objects: usize,
}

impl Normalized {
    /// Skipped rows that were objects without a usable order id.
    pub fn missing_id(&self) -> usize {
        self.dropped - self.not_objects
    }
}

/// Outcome of coercing one cell.
enum Cell<T> {
    Empty,
    Value(T),
    Invalid,
}

/// Map one raw row to a record.
///
/// When several aliases of the same field appear, the first non-empty one in
/// row order wins and the others stay in `extra`.
pub fn normalize_row(row: &Map<String, Value>) -> Result<OrderRecord, RowRejection> {
    let mut id_key = None;
    let mut order_id = None;
    for (key, value) in row {
        if canonical_field(key) == Some(F::OrderId) {
            if let Some(id) = OrderId::from_cell(value) {
                id_key = Some(key.as_str());
                order_id = Some(id);
                break;
            }
        }
    }
    let order_id = order_id.ok_or(RowRejection::MissingOrderId)?;
    let mut record = OrderRecord::new(order_id);

    for (key, value) in row {
        if Some(key.as_str()) == id_key {
            continue;
        }
        let Some(field) = canonical_field(key) else {
            record.extra.insert(key.clone(), value.clone());
            continue;
        };

        let kept = match record.slot_mut(field) {
            // A second id column only survives if it holds something
            Slot::Id => OrderId::from_cell(value).is_none(),
            Slot::Text(slot) => fill(slot, text_cell(value)),
            Slot::Amount(slot) => {
                let cell = amount_cell(value);
                if matches!(cell, Cell::Invalid) {
                    warn!(
                        column = %key,
                        value = %value,
                        "Unreadable amount kept as raw column"
                    );
                }
                fill(slot, cell)
            }
        };
        if !kept {
            record.extra.insert(displaced_key(key), value.clone());
        }
    }

    Ok(record)
}

/// Prefix for a displaced column whose header is itself a canonical name.
pub const DISPLACED_PREFIX: &str = "raw:";

/// Key under which a displaced column is kept in `extra`.
///
/// `extra` is flattened next to the canonical fields, so a header that
/// spells a canonical name gets [`DISPLACED_PREFIX`] to stay unique.
fn displaced_key(key: &str) -> String {
    if CanonicalField::ALL.iter().any(|field| field.name() == key) {
        format!("{}{}", DISPLACED_PREFIX, key)
    } else {
        key.to_string()
    }
}

/// Store a coerced cell. Returns `false` when the raw value must be kept
/// elsewhere (unreadable, or the slot was already filled by another alias).
fn fill<T>(slot: &mut Option<T>, cell: Cell<T>) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::Invalid => false,
        Cell::Value(v) => {
            if slot.is_some() {
                false
            } else {
                *slot = Some(v);
                true
            }
        }
    }
}

/// Normalize a full store payload.
///
/// The payload must be a non-empty array. Elements that are not objects or
/// lack an order id are counted in [`Normalized::dropped`].
pub fn normalize_payload(payload: &Value) -> Result<Normalized, PayloadError> {
    let rows = match payload {
        Value::Array(rows) => rows,
        other => return Err(PayloadError::NotAnArray(json_kind(other))),
    };
    if rows.is_empty() {
        return Err(PayloadError::Empty);
    }

    let mut normalized = Normalized::default();
    for (index, row) in rows.iter().enumerate() {
        let result = match row {
            Value::Object(map) => normalize_row(map),
            _ => Err(RowRejection::NotAnObject),
        };
        match result {
            Ok(record) => normalized.records.push(record),
            Err(reason) => {
                debug!(row = index, %reason, "Dropping store row");
                normalized.dropped += 1;
                if reason == RowRejection::NotAnObject {
                    normalized.not_objects += 1;
                }
            }
        }
    }
    Ok(normalized)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text_cell(value: &Value) -> Cell<String> {
    match value {
        Value::Null => Cell::Empty,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Value(trimmed.to_string())
            }
        }
        Value::Number(n) => Cell::Value(match n.as_f64() {
            // Phone numbers and ids come through as 9876543210.0
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::Bool(b) => Cell::Value(b.to_string()),
        Value::Array(_) | Value::Object(_) => Cell::Invalid,
    }
}

fn amount_cell(value: &Value) -> Cell<f64> {
    match value {
        Value::Null => Cell::Empty,
        Value::Number(n) => n.as_f64().map_or(Cell::Invalid, Cell::Value),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Cell::Empty;
            }
            let digits = ["₹", "Rs.", "Rs", "INR", "$"]
                .iter()
                .find_map(|symbol| trimmed.strip_prefix(symbol))
                .unwrap_or(trimmed)
                .trim()
                .replace(',', "");
            match digits.parse::<f64>() {
                Ok(amount) if amount.is_finite() => Cell::Value(amount),
                _ => Cell::Invalid,
            }
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Cell::Invalid,
    }
}
