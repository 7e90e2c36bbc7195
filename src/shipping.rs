//! Shipping

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{ids::Id, timestamps};

/// Shipment lifecycle status as reported by the shipping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingStatus {
    /// Created, not yet picked
    Pending,

    /// Being packed
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Moving through the carrier network
    InTransit,

    /// On the last leg
    OutForDelivery,

    /// Received by the customer
    Delivered,

    /// Sent back to the merchant
    Returned,

    /// Cancelled before delivery
    Cancelled,

    /// Delivery attempt failed
    Failed,

    /// Any status this crate does not recognise
    #[serde(other)]
    Unknown,
}

impl ShippingStatus {
    /// Every known status in lifecycle order.
    pub const ALL: [ShippingStatus; 9] = [
        ShippingStatus::Pending,
        ShippingStatus::Processing,
        ShippingStatus::Shipped,
        ShippingStatus::InTransit,
        ShippingStatus::OutForDelivery,
        ShippingStatus::Delivered,
        ShippingStatus::Returned,
        ShippingStatus::Cancelled,
        ShippingStatus::Failed,
    ];

    /// Whether the shipment has reached an end state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ShippingStatus::Delivered | ShippingStatus::Returned | ShippingStatus::Cancelled
        )
    }
}

/// Statuses an operator may pick for a shipment currently in `current`.
///
/// This is every known status except the current one. Transitions are validated by the
/// shipping service, not here.
pub fn next_status_options(current: ShippingStatus) -> impl Iterator<Item = ShippingStatus> {
    ShippingStatus::ALL
        .into_iter()
        .filter(move |status| *status != current)
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street and number
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    #[serde(default)]
    pub state: Option<String>,

    /// Postal code
    pub postal_code: String,

    /// Country
    pub country: String,
}

/// Shipment of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Shipment id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Order being shipped
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub order_id: Id,

    /// Carrier tracking number
    #[serde(default)]
    pub tracking_number: Option<String>,

    /// Carrier name
    #[serde(default)]
    pub carrier: Option<String>,

    /// Current status
    pub status: ShippingStatus,

    /// Delivery address
    #[serde(default)]
    pub address: Option<ShippingAddress>,

    /// Promised delivery time
    #[serde(default, deserialize_with = "timestamps::deserialize_option")]
    pub estimated_delivery: Option<Timestamp>,

    /// Creation time
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub created_at: Timestamp,

    /// Last status change
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub updated_at: Timestamp,
}

impl Shipment {
    /// Past its estimated delivery without reaching an end state.
    #[must_use]
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        !self.status.is_terminal() && self.estimated_delivery.is_some_and(|eta| eta < now)
    }
}
