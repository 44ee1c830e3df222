//! Form types with per-field validation.
//!
//! Validation failures surface as inline per-field messages, mirroring
//! how the source UI renders them next to each input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Shipping and contact details collected by the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
	/// Recipient name.
	#[validate(length(min = 2, message = "Name must be at least 2 characters"))]
	pub name: String,
	/// Recipient phone number.
	#[validate(length(min = 7, max = 20, message = "Enter a valid phone number"))]
	pub phone: String,
	/// Optional contact email.
	#[validate(email(message = "Enter a valid email address"))]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Street address.
	#[validate(length(min = 5, message = "Address must be at least 5 characters"))]
	pub address: String,
	/// City or town.
	#[validate(length(min = 2, message = "City is required"))]
	pub city: String,
	/// Region or state.
	#[validate(length(min = 2, message = "Region is required"))]
	pub region: String,
	/// Optional landmark for the rider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub landmark: Option<String>,
}

/// Editable fields of the user profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
	#[validate(length(min = 2, message = "Name must be at least 2 characters"))]
	pub name: Option<String>,
	#[validate(url(message = "Avatar must be a valid URL"))]
	pub avatar: Option<String>,
}

/// Flattens validator output into per-field message lists for inline
/// display.
pub fn field_errors(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
	errors
		.field_errors()
		.into_iter()
		.map(|(field, errs)| {
			let messages = errs
				.iter()
				.map(|e| {
					e.message
						.as_ref()
						.map(|m| m.to_string())
						.unwrap_or_else(|| format!("Invalid value for {}", field))
				})
				.collect();
			(field.to_string(), messages)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_form() -> CheckoutForm {
		CheckoutForm {
			name: "Ama Mensah".into(),
			phone: "0200000000".into(),
			email: Some("ama@example.com".into()),
			address: "12 High Street".into(),
			city: "Accra".into(),
			region: "Greater Accra".into(),
			landmark: None,
		}
	}

	#[test]
	fn valid_checkout_form_passes() {
		assert!(valid_form().validate().is_ok());
	}

	#[test]
	fn short_phone_reports_inline_message() {
		let mut form = valid_form();
		form.phone = "123".into();
		let errors = form.validate().unwrap_err();
		let flat = field_errors(&errors);
		assert_eq!(flat["phone"], vec!["Enter a valid phone number"]);
		assert!(!flat.contains_key("name"));
	}

	#[test]
	fn bad_email_reports_inline_message() {
		let mut form = valid_form();
		form.email = Some("not-an-email".into());
		let errors = form.validate().unwrap_err();
		let flat = field_errors(&errors);
		assert_eq!(flat["email"], vec!["Enter a valid email address"]);
	}
}
