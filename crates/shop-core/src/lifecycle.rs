//! Order status lifecycle controller.
//!
//! Enforces the legal status transition graph for an order and the
//! coupling between rider assignment and status: pending -> paid ->
//! shipped -> delivered, with shipped -> undelivered for failed
//! deliveries and cancellation permitted only from pending or paid.
//! Every order mutation in the application funnels through this module
//! before a request is issued, so an illegal transition never reaches
//! the wire.

use chrono::Utc;
use once_cell::sync::Lazy;
use shop_types::{Order, OrderStatus, Rider};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors that can occur during lifecycle operations.
///
/// On any error the order is left completely untouched.
#[derive(Debug, Error)]
pub enum LifecycleError {
	/// The requested status is unreachable from the current status.
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	/// The order is not in a status that permits the operation.
	#[error("Order is {status}; {operation} requires {required}")]
	InvalidState {
		status: OrderStatus,
		operation: &'static str,
		required: &'static str,
	},
	/// The rider exists but is not accepting assignments.
	#[error("Rider {0} is not active")]
	RiderUnavailable(String),
	/// The acting customer does not own the order.
	#[error("Not permitted to act on this order")]
	Forbidden,
}

/// The identity performing a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
	/// A customer acting on their own orders.
	Customer { user_id: String },
	/// A back-office operator.
	Admin,
}

// Static transition table - each state maps to allowed next states
static TRANSITIONS: Lazy<HashMap<OrderStatus, HashSet<OrderStatus>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(
		OrderStatus::Pending,
		HashSet::from([OrderStatus::Paid, OrderStatus::Cancelled]),
	);
	m.insert(
		OrderStatus::Paid,
		HashSet::from([OrderStatus::Shipped, OrderStatus::Cancelled]),
	);
	m.insert(
		OrderStatus::Shipped,
		HashSet::from([OrderStatus::Delivered, OrderStatus::Undelivered]),
	);
	m.insert(OrderStatus::Delivered, HashSet::new()); // terminal
	m.insert(OrderStatus::Undelivered, HashSet::new()); // terminal
	m.insert(OrderStatus::Cancelled, HashSet::new()); // terminal
	m
});

/// Checks if a state transition is valid.
pub fn is_valid_transition(from: &OrderStatus, to: &OrderStatus) -> bool {
	TRANSITIONS.get(from).is_some_and(|set| set.contains(to))
}

/// Returns the current unix timestamp in seconds.
pub fn now_secs() -> i64 {
	Utc::now().timestamp()
}

/// Controller applying validated lifecycle transitions to orders.
///
/// Operations take the order by mutable reference and a caller-supplied
/// timestamp; on failure the order is untouched.
pub struct OrderStatusController;

impl OrderStatusController {
	/// Transitions an order to a new status with validation.
	///
	/// On success the matching timestamp field (`paid_at`, `shipped_at`,
	/// `delivered_at`, `cancelled_at`) is stamped with `now` if not
	/// already set, and `updated_at` is bumped.
	pub fn update_status(
		order: &mut Order,
		new_status: OrderStatus,
		now: i64,
	) -> Result<(), LifecycleError> {
		if !is_valid_transition(&order.status, &new_status) {
			return Err(LifecycleError::InvalidTransition {
				from: order.status,
				to: new_status,
			});
		}

		tracing::debug!(
			order_id = %order.id,
			from = %order.status,
			to = %new_status,
			"order status transition"
		);

		order.status = new_status;
		Self::stamp(order, new_status, now);
		order.updated_at = now;
		Ok(())
	}

	/// Assigns a rider to a paid order and ships it as a single unit.
	///
	/// The order must be in `paid` status and the rider must be active.
	/// On success `assigned_rider` is set and the order is `shipped` with
	/// `shipped_at` stamped; the two never happen separately, so the UI
	/// can never show a rider on an order still in `paid`.
	pub fn assign_rider(
		order: &mut Order,
		rider: &Rider,
		now: i64,
	) -> Result<(), LifecycleError> {
		if order.status != OrderStatus::Paid {
			return Err(LifecycleError::InvalidState {
				status: order.status,
				operation: "rider assignment",
				required: "paid",
			});
		}
		if !rider.is_active {
			return Err(LifecycleError::RiderUnavailable(rider.id.clone()));
		}

		// From paid, shipped is always reachable, so this cannot fail
		// after the checks above; assignment and transition commit
		// together.
		order.assigned_rider = Some(rider.id.clone());
		Self::update_status(order, OrderStatus::Shipped, now)
	}

	/// Cancels an order on behalf of the acting identity.
	///
	/// Only `pending` and `paid` orders may be cancelled. A customer
	/// actor must own the order; admins may cancel any order.
	pub fn cancel_order(
		order: &mut Order,
		actor: &Actor,
		now: i64,
	) -> Result<(), LifecycleError> {
		if let Actor::Customer { user_id } = actor {
			if *user_id != order.customer_id {
				return Err(LifecycleError::Forbidden);
			}
		}

		if !matches!(order.status, OrderStatus::Pending | OrderStatus::Paid) {
			return Err(LifecycleError::InvalidState {
				status: order.status,
				operation: "cancellation",
				required: "pending or paid",
			});
		}

		Self::update_status(order, OrderStatus::Cancelled, now)
	}

	/// Stamps the timestamp field matching a status, if not already set.
	fn stamp(order: &mut Order, status: OrderStatus, now: i64) {
		let slot = match status {
			OrderStatus::Paid => &mut order.paid_at,
			OrderStatus::Shipped => &mut order.shipped_at,
			OrderStatus::Delivered => &mut order.delivered_at,
			OrderStatus::Cancelled => &mut order.cancelled_at,
			OrderStatus::Pending | OrderStatus::Undelivered => return,
		};
		if slot.is_none() {
			*slot = Some(now);
		}
	}
}
