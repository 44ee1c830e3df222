//! Delivery rider types.
//!
//! Riders are owned and mutated by the back-office rider-management
//! surface and referenced (never owned) by orders via `assigned_rider`.

use serde::{Deserialize, Serialize};

/// Delivery personnel assignable to orders in `paid` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
	/// Opaque identifier assigned by the backend.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Phone number used to coordinate deliveries.
	pub phone: String,
	/// Optional contact email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Whether the rider is currently accepting assignments.
	pub is_active: bool,
	/// Total orders ever assigned to this rider.
	#[serde(default)]
	pub total_assigned: u32,
	/// Orders this rider has successfully delivered.
	#[serde(default)]
	pub delivered_orders: u32,
	/// Orders currently out with this rider.
	#[serde(default)]
	pub ongoing_orders: u32,
	/// Unix timestamp of the rider's last recorded activity.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_active: Option<i64>,
}
