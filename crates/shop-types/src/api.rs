//! Wire types for the backend REST contract.
//!
//! All mutating endpoints respond with a `{ success, data }` or
//! `{ success, message }` envelope; list endpoints respond with
//! `{ data, meta: { page, pages, total } }`. The types here mirror that
//! contract exactly, with camelCase wire names.

use crate::order::{ContactInfo, OrderItem, ShippingAddress};
use crate::user::User;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope wrapping every non-list response from the backend.
///
/// On success `data` is present; on failure `success` is false and
/// `message` (plus optionally per-field `errors`) describes the problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
	/// Whether the request succeeded.
	pub success: bool,
	/// Response payload, present on success.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	/// Human-readable failure description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Per-field validation messages, present on form rejections.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub errors: Option<HashMap<String, Vec<String>>>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
	/// Parses an envelope from a JSON body.
	pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(body)
	}
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
	/// Current page, 1-based.
	pub page: u64,
	/// Total number of pages.
	pub pages: u64,
	/// Total number of records across all pages.
	pub total: u64,
}

/// A page of records as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
	/// Records on this page.
	pub data: Vec<T>,
	/// Pagination metadata.
	pub meta: PageMeta,
}

/// Query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
	/// 1-based page to fetch.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page: Option<u64>,
	/// Records per page.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u64>,
	/// Status filter (orders) or category filter (products).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Free-text search.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
}

/// Request body for `POST /auth/google`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
	/// The Google identity credential obtained by the front channel.
	pub credential: String,
}

/// Successful login payload: a bearer token plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
	/// Bearer token for subsequent requests.
	pub token: String,
	/// The authenticated user.
	pub user: User,
}

/// Request body for `POST /auth/check-approval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckApprovalRequest {
	pub email: String,
}

/// Response payload for `POST /auth/check-approval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckApprovalResponse {
	pub approved: bool,
}

/// Request body for `POST /orders`: the checkout snapshot.
///
/// Prices are computed client-side at creation time and echoed to the
/// backend, which recomputes and persists the authoritative record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	pub order_items: Vec<OrderItem>,
	pub shipping_address: ShippingAddress,
	pub contact_info: ContactInfo,
	pub items_price: Decimal,
	pub shipping_price: Decimal,
	pub tax_price: Decimal,
	pub total_price: Decimal,
}

/// Request body for `PATCH /orders/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
	pub status: crate::order::OrderStatus,
}

/// Request body for rider assignment via `PATCH /orders/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRiderRequest {
	pub rider_id: String,
}

/// Request body for `PATCH /users/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>,
}

/// Request body for `POST /admin/approved-emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddApprovedEmailRequest {
	pub email: String,
}

/// Aggregates for the back-office dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	pub total_orders: u64,
	pub pending_orders: u64,
	pub ongoing_deliveries: u64,
	pub total_products: u64,
	pub total_customers: u64,
	pub active_riders: u64,
	/// Lifetime revenue over paid orders.
	pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::order::OrderStatus;

	#[test]
	fn success_envelope_carries_data() {
		let body = r#"{"success": true, "data": {"approved": true}}"#;
		let envelope: ApiEnvelope<CheckApprovalResponse> = ApiEnvelope::from_json(body).unwrap();
		assert!(envelope.success);
		assert!(envelope.data.unwrap().approved);
	}

	#[test]
	fn failure_envelope_carries_message_and_field_errors() {
		let body = r#"{
			"success": false,
			"message": "Validation failed",
			"errors": {"phone": ["Phone number is required"]}
		}"#;
		let envelope: ApiEnvelope<CheckApprovalResponse> = ApiEnvelope::from_json(body).unwrap();
		assert!(!envelope.success);
		assert!(envelope.data.is_none());
		let errors = envelope.errors.unwrap();
		assert_eq!(errors["phone"], vec!["Phone number is required"]);
	}

	#[test]
	fn status_request_uses_lowercase_wire_name() {
		let body = serde_json::to_string(&UpdateStatusRequest {
			status: OrderStatus::Shipped,
		})
		.unwrap();
		assert_eq!(body, r#"{"status":"shipped"}"#);
	}

	#[test]
	fn paginated_orders_parse_meta() {
		let body = r#"{"data": [], "meta": {"page": 2, "pages": 5, "total": 93}}"#;
		let page: Paginated<serde_json::Value> = serde_json::from_str(body).unwrap();
		assert_eq!(
			page.meta,
			PageMeta {
				page: 2,
				pages: 5,
				total: 93
			}
		);
	}
}
