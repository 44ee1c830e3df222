//! Capability-checked route guard.
//!
//! The source UI compared role strings ad hoc inside each screen; here
//! the check is a single evaluation per navigation: a route names the
//! capability it requires, roles map to capability sets, and the guard
//! produces one of three outcomes the shell acts on.

use crate::session::Session;
use once_cell::sync::Lazy;
use shop_types::Role;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Navigable surfaces of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
	/// Public product listing.
	Storefront,
	/// Public product detail page.
	ProductDetail,
	/// The shopping cart.
	Cart,
	/// The checkout flow.
	Checkout,
	/// The login screen.
	Login,
	/// The user's profile editor.
	Profile,
	/// The customer's own order list and detail pages.
	MyOrders,
	/// Back-office dashboard.
	AdminDashboard,
	/// Back-office order console.
	AdminOrders,
	/// Back-office catalog management.
	AdminProducts,
	/// Back-office rider management.
	AdminRiders,
	/// Back-office login approval list.
	AdminApprovedEmails,
}

/// Things a user may be permitted to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	PlaceOrders,
	ViewOwnOrders,
	EditProfile,
	ViewDashboard,
	ManageOrders,
	ManageCatalog,
	ManageRiders,
	ManageApprovals,
}

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
	/// Render the requested route.
	Allow,
	/// Not logged in; send the user to the login screen.
	RedirectToLogin,
	/// Logged in but not permitted; show the forbidden screen.
	Forbidden,
}

impl fmt::Display for GuardOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GuardOutcome::Allow => write!(f, "allow"),
			GuardOutcome::RedirectToLogin => write!(f, "redirect-to-login"),
			GuardOutcome::Forbidden => write!(f, "forbidden"),
		}
	}
}

// Role -> capability set. Admins intentionally do not hold PlaceOrders:
// back-office accounts are not shoppers.
static ROLE_CAPABILITIES: Lazy<HashMap<Role, HashSet<Capability>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(
		Role::Customer,
		HashSet::from([
			Capability::PlaceOrders,
			Capability::ViewOwnOrders,
			Capability::EditProfile,
		]),
	);
	m.insert(
		Role::Admin,
		HashSet::from([
			Capability::EditProfile,
			Capability::ViewDashboard,
			Capability::ManageOrders,
			Capability::ManageCatalog,
			Capability::ManageRiders,
			Capability::ManageApprovals,
		]),
	);
	m
});

/// Returns the capability a route requires, or None for public routes.
fn required_capability(route: Route) -> Option<Capability> {
	match route {
		Route::Storefront | Route::ProductDetail | Route::Cart | Route::Login => None,
		Route::Checkout => Some(Capability::PlaceOrders),
		Route::Profile => Some(Capability::EditProfile),
		Route::MyOrders => Some(Capability::ViewOwnOrders),
		Route::AdminDashboard => Some(Capability::ViewDashboard),
		Route::AdminOrders => Some(Capability::ManageOrders),
		Route::AdminProducts => Some(Capability::ManageCatalog),
		Route::AdminRiders => Some(Capability::ManageRiders),
		Route::AdminApprovedEmails => Some(Capability::ManageApprovals),
	}
}

/// Evaluates navigations against the session, once per navigation.
pub struct RouteGuard;

impl RouteGuard {
	/// Decides whether the session may navigate to the route.
	pub fn evaluate(route: Route, session: &Session) -> GuardOutcome {
		let Some(required) = required_capability(route) else {
			return GuardOutcome::Allow;
		};

		let Some(user) = session.user() else {
			return GuardOutcome::RedirectToLogin;
		};

		if Self::role_has(user.role, required) {
			GuardOutcome::Allow
		} else {
			GuardOutcome::Forbidden
		}
	}

	/// Checks a capability directly, for non-navigation gating.
	pub fn role_has(role: Role, capability: Capability) -> bool {
		ROLE_CAPABILITIES
			.get(&role)
			.is_some_and(|set| set.contains(&capability))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_types::{SecretString, User};

	fn session_with(role: Role) -> Session {
		let mut session = Session::default();
		session.login(
			User {
				id: "usr_1".into(),
				name: "Ama".into(),
				email: "ama@example.com".into(),
				role,
				avatar: None,
			},
			SecretString::from("token"),
		);
		session
	}

	#[test]
	fn public_routes_allow_anonymous() {
		let session = Session::default();
		for route in [Route::Storefront, Route::ProductDetail, Route::Cart, Route::Login] {
			assert_eq!(RouteGuard::evaluate(route, &session), GuardOutcome::Allow);
		}
	}

	#[test]
	fn protected_routes_redirect_anonymous_to_login() {
		let session = Session::default();
		for route in [Route::Checkout, Route::MyOrders, Route::AdminOrders] {
			assert_eq!(
				RouteGuard::evaluate(route, &session),
				GuardOutcome::RedirectToLogin
			);
		}
	}

	#[test]
	fn customers_cannot_reach_back_office() {
		let session = session_with(Role::Customer);
		for route in [
			Route::AdminDashboard,
			Route::AdminOrders,
			Route::AdminProducts,
			Route::AdminRiders,
			Route::AdminApprovedEmails,
		] {
			assert_eq!(
				RouteGuard::evaluate(route, &session),
				GuardOutcome::Forbidden
			);
		}
		assert_eq!(
			RouteGuard::evaluate(Route::Checkout, &session),
			GuardOutcome::Allow
		);
	}

	#[test]
	fn admins_reach_back_office_but_not_checkout() {
		let session = session_with(Role::Admin);
		assert_eq!(
			RouteGuard::evaluate(Route::AdminOrders, &session),
			GuardOutcome::Allow
		);
		assert_eq!(
			RouteGuard::evaluate(Route::Checkout, &session),
			GuardOutcome::Forbidden
		);
	}

	#[test]
	fn both_roles_edit_their_profile() {
		for role in [Role::Customer, Role::Admin] {
			let session = session_with(role);
			assert_eq!(
				RouteGuard::evaluate(Route::Profile, &session),
				GuardOutcome::Allow
			);
		}
	}
}
