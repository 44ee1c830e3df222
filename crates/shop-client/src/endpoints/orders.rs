//! Order endpoints.
//!
//! Every mutating call here is pre-validated through the lifecycle
//! controller on a local copy of the order, so an illegal transition is
//! rejected without a network round-trip, and then re-fetches the
//! authoritative record afterwards. The backend remains last-write-wins;
//! the local copy is never kept.

use crate::{ClientError, ShopApi};
use shop_core::{now_secs, Actor, OrderStatusController};
use shop_types::{
	AssignRiderRequest, CreateOrderRequest, ListQuery, Order, OrderStatus, Paginated,
	UpdateStatusRequest,
};

impl ShopApi {
	/// Places an order from a checkout snapshot (`POST /orders`).
	pub async fn place_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
		self.post_json("/orders", request).await
	}

	/// Lists the customer's own orders (`GET /orders`).
	pub async fn my_orders(&self, query: &ListQuery) -> Result<Paginated<Order>, ClientError> {
		self.get_page("/orders", query).await
	}

	/// Fetches one order (`GET /orders/:id`).
	pub async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
		self.get_json(&format!("/orders/{}", id)).await
	}

	/// Updates an order's status (`PATCH /orders/:id/status`).
	///
	/// Fetches the current record, validates the transition locally, and
	/// only then issues the request; returns the re-fetched order.
	pub async fn update_order_status(
		&self,
		id: &str,
		new_status: OrderStatus,
	) -> Result<Order, ClientError> {
		let mut order = self.get_order(id).await?;
		OrderStatusController::update_status(&mut order, new_status, now_secs())?;

		let _: Order = self
			.patch_json(
				&format!("/orders/{}/status", id),
				&UpdateStatusRequest { status: new_status },
			)
			.await?;

		self.get_order(id).await
	}

	/// Assigns an active rider to a paid order, shipping it as one unit
	/// (`PATCH /admin/orders/:id/assign-rider`).
	///
	/// The rider directory is consulted first so an inactive rider is
	/// rejected locally; returns the re-fetched order.
	pub async fn assign_rider(&self, id: &str, rider_id: &str) -> Result<Order, ClientError> {
		let riders = self.list_riders().await?;
		let rider = riders
			.into_iter()
			.find(|r| r.id == rider_id)
			.ok_or_else(|| ClientError::Api {
				status: 404,
				message: format!("Rider {} not found", rider_id),
			})?;

		let mut order = self.get_order(id).await?;
		OrderStatusController::assign_rider(&mut order, &rider, now_secs())?;

		let _: Order = self
			.patch_json(
				&format!("/admin/orders/{}/assign-rider", id),
				&AssignRiderRequest {
					rider_id: rider_id.to_string(),
				},
			)
			.await?;

		self.get_order(id).await
	}

	/// Cancels an order on behalf of the acting identity
	/// (`PATCH /orders/:id/cancel`); returns the re-fetched order.
	pub async fn cancel_order(&self, id: &str, actor: &Actor) -> Result<Order, ClientError> {
		let mut order = self.get_order(id).await?;
		OrderStatusController::cancel_order(&mut order, actor, now_secs())?;

		let _: Order = self
			.patch_json(&format!("/orders/{}/cancel", id), &serde_json::json!({}))
			.await?;

		self.get_order(id).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_core::LifecycleError;
	use std::time::Duration;

	fn order_json(status: &str) -> serde_json::Value {
		serde_json::json!({
			"id": "ord_1",
			"customerId": "usr_1",
			"status": status,
			"orderItems": [],
			"shippingAddress": {"address": "12 High Street", "city": "Accra", "region": "GA"},
			"contactInfo": {"name": "Ama", "phone": "0200000000"},
			"itemsPrice": "100.00",
			"shippingPrice": "15.00",
			"taxPrice": "0.00",
			"totalPrice": "115.00",
			"createdAt": 1700000000,
			"updatedAt": 1700000000
		})
	}

	fn envelope(data: serde_json::Value) -> String {
		serde_json::json!({"success": true, "data": data}).to_string()
	}

	fn api(server: &mockito::Server) -> ShopApi {
		ShopApi::new(server.url(), Duration::from_secs(5)).unwrap()
	}

	#[tokio::test]
	async fn illegal_status_update_never_reaches_the_wire() {
		let mut server = mockito::Server::new_async().await;
		let _get = server
			.mock("GET", "/orders/ord_1")
			.with_body(envelope(order_json("delivered")))
			.create_async()
			.await;
		let patch = server
			.mock("PATCH", "/orders/ord_1/status")
			.expect(0)
			.create_async()
			.await;

		let err = api(&server)
			.update_order_status("ord_1", OrderStatus::Shipped)
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			ClientError::Lifecycle(LifecycleError::InvalidTransition { .. })
		));
		patch.assert_async().await;
	}

	#[tokio::test]
	async fn status_update_patches_then_refetches() {
		let mut server = mockito::Server::new_async().await;
		let get = server
			.mock("GET", "/orders/ord_1")
			.with_body(envelope(order_json("pending")))
			.expect(2)
			.create_async()
			.await;
		let patch = server
			.mock("PATCH", "/orders/ord_1/status")
			.match_body(mockito::Matcher::JsonString(r#"{"status":"paid"}"#.into()))
			.with_body(envelope(order_json("paid")))
			.create_async()
			.await;

		let order = api(&server)
			.update_order_status("ord_1", OrderStatus::Paid)
			.await
			.unwrap();

		// The result is the re-fetched record, not the local copy
		assert_eq!(order.status, OrderStatus::Pending);
		get.assert_async().await;
		patch.assert_async().await;
	}

	#[tokio::test]
	async fn inactive_rider_is_rejected_before_any_request() {
		let mut server = mockito::Server::new_async().await;
		let _riders = server
			.mock("GET", "/users/riders")
			.with_body(envelope(serde_json::json!([{
				"id": "rid_1",
				"name": "Kofi",
				"phone": "0240000000",
				"isActive": false
			}])))
			.create_async()
			.await;
		let _get = server
			.mock("GET", "/orders/ord_1")
			.with_body(envelope(order_json("paid")))
			.create_async()
			.await;
		let patch = server
			.mock("PATCH", "/admin/orders/ord_1/assign-rider")
			.expect(0)
			.create_async()
			.await;

		let err = api(&server).assign_rider("ord_1", "rid_1").await.unwrap_err();

		assert!(matches!(
			err,
			ClientError::Lifecycle(LifecycleError::RiderUnavailable(_))
		));
		patch.assert_async().await;
	}

	#[tokio::test]
	async fn foreign_customer_cannot_cancel() {
		let mut server = mockito::Server::new_async().await;
		let _get = server
			.mock("GET", "/orders/ord_1")
			.with_body(envelope(order_json("pending")))
			.create_async()
			.await;
		let patch = server
			.mock("PATCH", "/orders/ord_1/cancel")
			.expect(0)
			.create_async()
			.await;

		let actor = Actor::Customer {
			user_id: "usr_2".into(),
		};
		let err = api(&server).cancel_order("ord_1", &actor).await.unwrap_err();

		assert!(matches!(
			err,
			ClientError::Lifecycle(LifecycleError::Forbidden)
		));
		patch.assert_async().await;
	}
}
