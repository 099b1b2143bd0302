//! Normalized order records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CanonicalField, OrderId, Status};

/// One order row after column normalization.
///
/// Columns that have no canonical name are carried in `extra` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_dispatch_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_doc_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_card_link: Option<String>,
    /// Raw status text. Any value the store holds is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Borrowed value of one canonical field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Id(&'a OrderId),
    Text(&'a str),
    Amount(f64),
}

/// Mutable storage behind a canonical field.
pub(crate) enum Slot<'a> {
    Id,
    Text(&'a mut Option<String>),
    Amount(&'a mut Option<f64>),
}

impl OrderRecord {
    /// Record with only its id set.
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            customer_name: None,
            customer_phone: None,
            order_date: None,
            expected_delivery_date: None,
            product_type: None,
            product_link: None,
            customization: None,
            final_price: None,
            initial_paid: None,
            manufacturing_cost: None,
            shipping_cost: None,
            delivery_location: None,
            delivery_address: None,
            expected_dispatch_date: None,
            tracking_doc_link: None,
            pan_card_link: None,
            status: None,
            extra: BTreeMap::new(),
        }
    }

    /// Lifecycle status, when the raw text is one of the known labels.
    pub fn status(&self) -> Option<Status> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether the order has left the workshop.
    pub fn is_dispatched(&self) -> bool {
        self.status().is_some_and(|s| s.is_dispatched())
    }

    /// Amount still owed by the customer.
    pub fn balance_due(&self) -> Option<f64> {
        Some(self.final_price? - self.initial_paid?)
    }

    pub fn field(&self, field: CanonicalField) -> Option<FieldValue<'_>> {
        fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
            value.as_deref().map(FieldValue::Text)
        }

        match field {
            CanonicalField::OrderId => Some(FieldValue::Id(&self.order_id)),
            CanonicalField::CustomerName => text(&self.customer_name),
            CanonicalField::CustomerPhone => text(&self.customer_phone),
            CanonicalField::OrderDate => text(&self.order_date),
            CanonicalField::ExpectedDeliveryDate => text(&self.expected_delivery_date),
            CanonicalField::ProductType => text(&self.product_type),
            CanonicalField::ProductLink => text(&self.product_link),
            CanonicalField::Customization => text(&self.customization),
            CanonicalField::FinalPrice => self.final_price.map(FieldValue::Amount),
            CanonicalField::InitialPaid => self.initial_paid.map(FieldValue::Amount),
            CanonicalField::ManufacturingCost => self.manufacturing_cost.map(FieldValue::Amount),
            CanonicalField::ShippingCost => self.shipping_cost.map(FieldValue::Amount),
            CanonicalField::DeliveryLocation => text(&self.delivery_location),
            CanonicalField::DeliveryAddress => text(&self.delivery_address),
            CanonicalField::ExpectedDispatchDate => text(&self.expected_dispatch_date),
            CanonicalField::TrackingDocLink => text(&self.tracking_doc_link),
            CanonicalField::PanCardLink => text(&self.pan_card_link),
            CanonicalField::Status => text(&self.status),
        }
    }

    pub(crate) fn slot_mut(&mut self, field: CanonicalField) -> Slot<'_> {
        match field {
            CanonicalField::OrderId => Slot::Id,
            CanonicalField::CustomerName => Slot::Text(&mut self.customer_name),
            CanonicalField::CustomerPhone => Slot::Text(&mut self.customer_phone),
            CanonicalField::OrderDate => Slot::Text(&mut self.order_date),
            CanonicalField::ExpectedDeliveryDate => Slot::Text(&mut self.expected_delivery_date),
            CanonicalField::ProductType => Slot::Text(&mut self.product_type),
            CanonicalField::ProductLink => Slot::Text(&mut self.product_link),
            CanonicalField::Customization => Slot::Text(&mut self.customization),
            CanonicalField::FinalPrice => Slot::Amount(&mut self.final_price),
            CanonicalField::InitialPaid => Slot::Amount(&mut self.initial_paid),
            CanonicalField::ManufacturingCost => Slot::Amount(&mut self.manufacturing_cost),
            CanonicalField::ShippingCost => Slot::Amount(&mut self.shipping_cost),
            CanonicalField::DeliveryLocation => Slot::Text(&mut self.delivery_location),
            CanonicalField::DeliveryAddress => Slot::Text(&mut self.delivery_address),
            CanonicalField::ExpectedDispatchDate => Slot::Text(&mut self.expected_dispatch_date),
            CanonicalField::TrackingDocLink => Slot::Text(&mut self.tracking_doc_link),
            CanonicalField::PanCardLink => Slot::Text(&mut self.pan_card_link),
            CanonicalField::Status => Slot::Text(&mut self.status),
        }
    }
}
