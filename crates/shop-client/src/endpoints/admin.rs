//! Back-office endpoints.
//!
//! These routes require an admin bearer token; the backend answers 403
//! for anyone else, which the client surfaces as `Unauthorized`.

use crate::{ClientError, ShopApi};
use shop_types::{
	AddApprovedEmailRequest, ApprovedEmail, DashboardStats, ListQuery, Order, Paginated,
};

impl ShopApi {
	/// Fetches dashboard aggregates (`GET /admin/dashboard`).
	pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
		self.get_json("/admin/dashboard").await
	}

	/// Lists all orders across customers (`GET /admin/orders`).
	pub async fn all_orders(&self, query: &ListQuery) -> Result<Paginated<Order>, ClientError> {
		self.get_page("/admin/orders", query).await
	}

	/// Lists the admin-login approval list (`GET /admin/approved-emails`).
	pub async fn approved_emails(&self) -> Result<Vec<ApprovedEmail>, ClientError> {
		self.get_json("/admin/approved-emails").await
	}

	/// Adds an email to the approval list (`POST /admin/approved-emails`).
	pub async fn add_approved_email(&self, email: &str) -> Result<ApprovedEmail, ClientError> {
		self.post_json(
			"/admin/approved-emails",
			&AddApprovedEmailRequest {
				email: email.to_string(),
			},
		)
		.await
	}

	/// Removes an approval-list entry (`DELETE /admin/approved-emails/:id`).
	pub async fn remove_approved_email(&self, id: &str) -> Result<(), ClientError> {
		let _: serde_json::Value = self
			.delete_json(&format!("/admin/approved-emails/{}", id))
			.await?;
		Ok(())
	}
}
