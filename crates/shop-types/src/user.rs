//! User identity and role types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An authenticated user of the storefront or back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Opaque identifier assigned by the backend.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Email address (also the approval-list key for admins).
	pub email: String,
	/// Role governing which surfaces the user may navigate to.
	pub role: Role,
	/// Optional avatar URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>,
}

impl User {
	/// Returns true for back-office users.
	pub fn is_admin(&self) -> bool {
		self.role == Role::Admin
	}
}

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// A shopper: places and cancels their own orders.
	Customer,
	/// A back-office operator: manages orders, riders and the catalog.
	Admin,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Customer => write!(f, "customer"),
			Role::Admin => write!(f, "admin"),
		}
	}
}

impl FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"customer" => Ok(Role::Customer),
			"admin" => Ok(Role::Admin),
			other => Err(format!("unknown role: {}", other)),
		}
	}
}

/// An email on the back-office approval list. Only approved emails may
/// complete an admin login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedEmail {
	/// Opaque identifier assigned by the backend.
	pub id: String,
	/// The approved email address.
	pub email: String,
	/// Admin who added the entry.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub added_by: Option<String>,
	/// Unix timestamp when the entry was added.
	pub created_at: i64,
}
