//! Core engine of the shop client.
//!
//! This crate holds the behavior the UI shells delegate to: the order
//! status lifecycle controller, the explicit session state container,
//! the capability-checked route guard, checkout total computation, and
//! client-side list handling.

/// Checkout: turning a cart into an order creation request.
pub mod checkout;
/// Capability-checked route guard.
pub mod guard;
/// Order status lifecycle controller.
pub mod lifecycle;
/// Client-side filtering and pagination.
pub mod paging;
/// Session state container and persistence.
pub mod session;

pub use checkout::{build_order_request, CheckoutError, CheckoutRules};
pub use guard::{Capability, GuardOutcome, Route, RouteGuard};
pub use lifecycle::{
	is_valid_transition, now_secs, Actor, LifecycleError, OrderStatusController,
};
pub use paging::{paginate, OrderFilter};
pub use session::{AuthState, Session, SessionError, SessionStore};
