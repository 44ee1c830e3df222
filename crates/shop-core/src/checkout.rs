//! Checkout: turning a cart into an order creation request.
//!
//! Totals are computed exactly once here, at creation time, from the
//! cart snapshot; the resulting request is immutable. The backend
//! recomputes authoritative totals, but what the shopper confirms is
//! what this module produced.

use rust_decimal::Decimal;
use shop_types::{field_errors, Cart, CheckoutForm, ContactInfo, CreateOrderRequest, ShippingAddress};
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur while preparing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
	/// The cart has no lines.
	#[error("Cart is empty")]
	EmptyCart,
	/// The shipping/contact form failed validation; messages are keyed
	/// by field for inline display.
	#[error("Checkout form is invalid")]
	Validation(HashMap<String, Vec<String>>),
}

/// Pricing rules applied at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRules {
	/// Flat shipping fee applied below the free-shipping threshold.
	pub shipping_fee: Decimal,
	/// Item total at or above which shipping is free.
	pub free_shipping_threshold: Decimal,
	/// Tax rate applied to the item total, as a fraction.
	pub tax_rate: Decimal,
}

/// Builds the order creation request from the cart and checkout form.
///
/// Validates the form, snapshots the cart lines, and computes the item,
/// shipping, tax and grand totals. Fails without side effects; the cart
/// is only cleared by the caller after the backend accepts the order.
pub fn build_order_request(
	cart: &Cart,
	form: &CheckoutForm,
	rules: &CheckoutRules,
) -> Result<CreateOrderRequest, CheckoutError> {
	if cart.is_empty() {
		return Err(CheckoutError::EmptyCart);
	}

	form.validate()
		.map_err(|errors| CheckoutError::Validation(field_errors(&errors)))?;

	let items_price = cart.items_total();
	let shipping_price = if items_price >= rules.free_shipping_threshold {
		Decimal::ZERO
	} else {
		rules.shipping_fee
	};
	let tax_price = (items_price * rules.tax_rate).round_dp(2);
	let total_price = items_price + shipping_price + tax_price;

	Ok(CreateOrderRequest {
		order_items: cart.to_order_items(),
		shipping_address: ShippingAddress {
			address: form.address.clone(),
			city: form.city.clone(),
			region: form.region.clone(),
			landmark: form.landmark.clone(),
		},
		contact_info: ContactInfo {
			name: form.name.clone(),
			phone: form.phone.clone(),
			email: form.email.clone(),
		},
		items_price,
		shipping_price,
		tax_price,
		total_price,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_types::CartItem;

	fn rules() -> CheckoutRules {
		CheckoutRules {
			shipping_fee: Decimal::new(15, 0),
			free_shipping_threshold: Decimal::new(200, 0),
			tax_rate: Decimal::new(5, 2), // 5%
		}
	}

	fn form() -> CheckoutForm {
		CheckoutForm {
			name: "Ama Mensah".into(),
			phone: "0200000000".into(),
			email: None,
			address: "12 High Street".into(),
			city: "Accra".into(),
			region: "Greater Accra".into(),
			landmark: Some("Opposite the bank".into()),
		}
	}

	fn cart_totaling(units: u32, unit_price: Decimal) -> Cart {
		let mut cart = Cart::new();
		cart.add(CartItem {
			product_id: "p1".into(),
			variant_id: "v1".into(),
			name: "Blender".into(),
			color: "silver".into(),
			size: "standard".into(),
			unit_price,
			quantity: units,
			image: "blender.jpg".into(),
		});
		cart
	}

	#[test]
	fn totals_are_computed_once_from_the_snapshot() {
		let cart = cart_totaling(2, Decimal::new(4000, 2)); // 80.00
		let request = build_order_request(&cart, &form(), &rules()).unwrap();

		assert_eq!(request.items_price, Decimal::new(8000, 2));
		assert_eq!(request.shipping_price, Decimal::new(15, 0));
		assert_eq!(request.tax_price, Decimal::new(400, 2)); // 5% of 80.00
		assert_eq!(request.total_price, Decimal::new(9900, 2));
		assert_eq!(request.order_items.len(), 1);
		assert_eq!(request.order_items[0].quantity, 2);
		assert_eq!(request.contact_info.name, "Ama Mensah");
	}

	#[test]
	fn shipping_is_free_at_the_threshold() {
		let cart = cart_totaling(2, Decimal::new(10000, 2)); // 200.00
		let request = build_order_request(&cart, &form(), &rules()).unwrap();
		assert_eq!(request.shipping_price, Decimal::ZERO);
	}

	#[test]
	fn empty_cart_is_rejected() {
		let cart = Cart::new();
		assert!(matches!(
			build_order_request(&cart, &form(), &rules()),
			Err(CheckoutError::EmptyCart)
		));
	}

	#[test]
	fn invalid_form_surfaces_field_errors() {
		let cart = cart_totaling(1, Decimal::ONE);
		let mut bad_form = form();
		bad_form.address = "x".into();

		match build_order_request(&cart, &bad_form, &rules()) {
			Err(CheckoutError::Validation(errors)) => {
				assert!(errors.contains_key("address"));
			}
			other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
		}
	}
}
