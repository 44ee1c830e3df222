//! Order types for the shop client.
//!
//! This module defines the order document as served by the backend API,
//! together with the status enumeration that drives the order lifecycle.
//! Orders are created by the checkout flow in `pending` status and are
//! mutated exclusively through validated lifecycle transitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A customer's placed purchase, tracked through a fixed status lifecycle.
///
/// Everything except `status`, `assigned_rider`, the transition timestamps
/// and `updated_at` is a snapshot captured at checkout and never mutated
/// afterwards. Orders are never deleted; they end in a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Opaque identifier assigned by the backend at creation.
	pub id: String,
	/// Identifier of the customer who placed the order.
	pub customer_id: String,
	/// Current status of the order.
	pub status: OrderStatus,
	/// Line item snapshot, fixed at order-creation time.
	pub order_items: Vec<OrderItem>,
	/// Delivery address snapshot captured at checkout.
	pub shipping_address: ShippingAddress,
	/// Contact snapshot captured at checkout.
	pub contact_info: ContactInfo,
	/// Sum of line item subtotals, computed once at creation.
	pub items_price: Decimal,
	/// Shipping fee, computed once at creation.
	pub shipping_price: Decimal,
	/// Tax, computed once at creation.
	pub tax_price: Decimal,
	/// Grand total, computed once at creation.
	pub total_price: Decimal,
	/// Rider assigned to deliver the order. Unset until explicitly
	/// assigned; assignment is the only writer.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub assigned_rider: Option<String>,
	/// Unix timestamp stamped when the order transitioned to `paid`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub paid_at: Option<i64>,
	/// Unix timestamp stamped when the order transitioned to `shipped`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shipped_at: Option<i64>,
	/// Unix timestamp stamped when the order transitioned to `delivered`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivered_at: Option<i64>,
	/// Unix timestamp stamped when the order was cancelled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cancelled_at: Option<i64>,
	/// Unix timestamp when the order was created.
	pub created_at: i64,
	/// Unix timestamp of the last mutation.
	pub updated_at: i64,
}

/// A single line of an order: one variant of one product.
///
/// Captured from the cart at checkout; the name, chosen color/size, unit
/// price and image are snapshots so later catalog edits never rewrite
/// order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
	/// Reference to the purchased product.
	pub product_id: String,
	/// Reference to the purchased variant.
	pub variant_id: String,
	/// Product name at purchase time.
	pub name: String,
	/// Chosen color.
	pub color: String,
	/// Chosen size.
	pub size: String,
	/// Unit price at purchase time.
	pub unit_price: Decimal,
	/// Quantity purchased.
	pub quantity: u32,
	/// Product image at purchase time.
	pub image: String,
}

impl OrderItem {
	/// Line subtotal (unit price times quantity).
	pub fn subtotal(&self) -> Decimal {
		self.unit_price * Decimal::from(self.quantity)
	}
}

/// Delivery address snapshot captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
	/// Street address.
	pub address: String,
	/// City or town.
	pub city: String,
	/// Region or state.
	pub region: String,
	/// Optional landmark to help the rider find the address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub landmark: Option<String>,
}

/// Contact snapshot captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
	/// Recipient name.
	pub name: String,
	/// Recipient phone number.
	pub phone: String,
	/// Optional contact email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// Status of an order in its lifecycle.
///
/// The legal progression is linear (`pending -> paid -> shipped ->
/// delivered`), with `shipped -> undelivered` for failed deliveries and
/// cancellation permitted only from `pending` or `paid`. `Delivered`,
/// `Undelivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order has been placed but not yet paid for.
	Pending,
	/// Payment has been confirmed.
	Paid,
	/// A rider has the order and it is out for delivery.
	Shipped,
	/// The order reached the customer.
	Delivered,
	/// Delivery was attempted and failed.
	Undelivered,
	/// The order was cancelled before shipping.
	Cancelled,
}

impl OrderStatus {
	/// Returns true if no further transitions are permitted.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			OrderStatus::Delivered | OrderStatus::Undelivered | OrderStatus::Cancelled
		)
	}

	/// Returns the wire representation of the status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Pending => "pending",
			OrderStatus::Paid => "paid",
			OrderStatus::Shipped => "shipped",
			OrderStatus::Delivered => "delivered",
			OrderStatus::Undelivered => "undelivered",
			OrderStatus::Cancelled => "cancelled",
		}
	}

	/// Returns an iterator over all status variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Pending,
			Self::Paid,
			Self::Shipped,
			Self::Delivered,
			Self::Undelivered,
			Self::Cancelled,
		]
		.into_iter()
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for OrderStatus {
	type Err = UnknownStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(Self::Pending),
			"paid" => Ok(Self::Paid),
			"shipped" => Ok(Self::Shipped),
			"delivered" => Ok(Self::Delivered),
			"undelivered" => Ok(Self::Undelivered),
			"cancelled" => Ok(Self::Cancelled),
			other => Err(UnknownStatus(other.to_string())),
		}
	}
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);
