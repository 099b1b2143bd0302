//! Canonical order attributes.

/// How a field's cells are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Amount,
}

/// One canonical attribute of an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    OrderId,
    CustomerName,
    CustomerPhone,
    OrderDate,
    ExpectedDeliveryDate,
    ProductType,
    ProductLink,
    Customization,
    FinalPrice,
    InitialPaid,
    ManufacturingCost,
    ShippingCost,
    DeliveryLocation,
    DeliveryAddress,
    ExpectedDispatchDate,
    TrackingDocLink,
    PanCardLink,
    Status,
}

impl CanonicalField {
    /// Every field, in order-sheet column order.
    pub const ALL: [CanonicalField; 18] = [
        Self::OrderId,
        Self::CustomerName,
        Self::CustomerPhone,
        Self::OrderDate,
        Self::ExpectedDeliveryDate,
        Self::ProductType,
        Self::ProductLink,
        Self::Customization,
        Self::FinalPrice,
        Self::InitialPaid,
        Self::ManufacturingCost,
        Self::ShippingCost,
        Self::DeliveryLocation,
        Self::DeliveryAddress,
        Self::ExpectedDispatchDate,
        Self::TrackingDocLink,
        Self::PanCardLink,
        Self::Status,
    ];

    /// Canonical (serialized) name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderId => "orderId",
            Self::CustomerName => "customerName",
            Self::CustomerPhone => "customerPhone",
            Self::OrderDate => "orderDate",
            Self::ExpectedDeliveryDate => "expectedDeliveryDate",
            Self::ProductType => "productType",
            Self::ProductLink => "productLink",
            Self::Customization => "customization",
            Self::FinalPrice => "finalPrice",
            Self::InitialPaid => "initialPaid",
            Self::ManufacturingCost => "manufacturingCost",
            Self::ShippingCost => "shippingCost",
            Self::DeliveryLocation => "deliveryLocation",
            Self::DeliveryAddress => "deliveryAddress",
            Self::ExpectedDispatchDate => "expectedDispatchDate",
            Self::TrackingDocLink => "trackingDocLink",
            Self::PanCardLink => "panCardLink",
            Self::Status => "status",
        }
    }

    /// Human-readable label used on order cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrderId => "Order ID",
            Self::CustomerName => "Customer name",
            Self::CustomerPhone => "Customer phone",
            Self::OrderDate => "Order date",
            Self::ExpectedDeliveryDate => "Expected delivery date",
            Self::ProductType => "Product type",
            Self::ProductLink => "Product link",
            Self::Customization => "Customization",
            Self::FinalPrice => "Final price",
            Self::InitialPaid => "Initial paid amount",
            Self::ManufacturingCost => "Manufacturing cost",
            Self::ShippingCost => "Shipping cost",
            Self::DeliveryLocation => "Delivery location",
            Self::DeliveryAddress => "Delivery address",
            Self::ExpectedDispatchDate => "Expected dispatch date",
            Self::TrackingDocLink => "Tracking document",
            Self::PanCardLink => "PAN card",
            Self::Status => "Status",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::OrderId => FieldKind::Id,
            Self::FinalPrice | Self::InitialPaid | Self::ManufacturingCost | Self::ShippingCost => {
                FieldKind::Amount
            }
            _ => FieldKind::Text,
        }
    }
}
