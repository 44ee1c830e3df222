//! Shopping cart types.
//!
//! The cart is in-memory client state, persisted only through the
//! explicit session store. Lines are keyed by (product, variant); adding
//! the same variant twice merges quantities rather than duplicating the
//! line.

use crate::order::OrderItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
	/// Product being purchased.
	pub product_id: String,
	/// Chosen variant of the product.
	pub variant_id: String,
	/// Product name, shown in the cart and snapshotted at checkout.
	pub name: String,
	/// Chosen color.
	pub color: String,
	/// Chosen size.
	pub size: String,
	/// Unit price at the time the line was added.
	pub unit_price: Decimal,
	/// Quantity requested.
	pub quantity: u32,
	/// Image shown in the cart.
	pub image: String,
}

impl CartItem {
	/// Line subtotal (unit price times quantity).
	pub fn subtotal(&self) -> Decimal {
		self.unit_price * Decimal::from(self.quantity)
	}
}

/// The shopping cart: an ordered list of lines keyed by (product, variant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
	/// Cart lines, in insertion order.
	pub items: Vec<CartItem>,
}

impl Cart {
	/// Creates an empty cart.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a line to the cart, merging quantities if the same
	/// (product, variant) pair is already present.
	pub fn add(&mut self, item: CartItem) {
		if let Some(existing) = self
			.items
			.iter_mut()
			.find(|i| i.product_id == item.product_id && i.variant_id == item.variant_id)
		{
			existing.quantity = existing.quantity.saturating_add(item.quantity);
		} else {
			self.items.push(item);
		}
	}

	/// Removes the line for the given (product, variant), if present.
	pub fn remove(&mut self, product_id: &str, variant_id: &str) {
		self.items
			.retain(|i| !(i.product_id == product_id && i.variant_id == variant_id));
	}

	/// Sets the quantity of an existing line. A quantity of zero removes
	/// the line. Returns false if no matching line exists.
	pub fn set_quantity(&mut self, product_id: &str, variant_id: &str, quantity: u32) -> bool {
		if quantity == 0 {
			let had = self
				.items
				.iter()
				.any(|i| i.product_id == product_id && i.variant_id == variant_id);
			self.remove(product_id, variant_id);
			return had;
		}
		match self
			.items
			.iter_mut()
			.find(|i| i.product_id == product_id && i.variant_id == variant_id)
		{
			Some(item) => {
				item.quantity = quantity;
				true
			}
			None => false,
		}
	}

	/// Empties the cart.
	pub fn clear(&mut self) {
		self.items.clear();
	}

	/// Returns true if the cart has no lines.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Total number of units across all lines.
	pub fn unit_count(&self) -> u32 {
		self.items.iter().map(|i| i.quantity).sum()
	}

	/// Sum of line subtotals.
	pub fn items_total(&self) -> Decimal {
		self.items.iter().map(CartItem::subtotal).sum()
	}

	/// Snapshots the cart lines as order items for checkout.
	pub fn to_order_items(&self) -> Vec<OrderItem> {
		self.items
			.iter()
			.map(|i| OrderItem {
				product_id: i.product_id.clone(),
				variant_id: i.variant_id.clone(),
				name: i.name.clone(),
				color: i.color.clone(),
				size: i.size.clone(),
				unit_price: i.unit_price,
				quantity: i.quantity,
				image: i.image.clone(),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn line(product: &str, variant: &str, qty: u32) -> CartItem {
		CartItem {
			product_id: product.into(),
			variant_id: variant.into(),
			name: "Kettle".into(),
			color: "white".into(),
			size: "1.7L".into(),
			unit_price: Decimal::new(2500, 2),
			quantity: qty,
			image: "kettle.jpg".into(),
		}
	}

	#[test]
	fn adding_same_variant_merges_quantities() {
		let mut cart = Cart::new();
		cart.add(line("p1", "v1", 1));
		cart.add(line("p1", "v1", 2));
		assert_eq!(cart.items.len(), 1);
		assert_eq!(cart.items[0].quantity, 3);
	}

	#[test]
	fn different_variants_stay_separate() {
		let mut cart = Cart::new();
		cart.add(line("p1", "v1", 1));
		cart.add(line("p1", "v2", 1));
		assert_eq!(cart.items.len(), 2);
	}

	#[test]
	fn set_quantity_zero_removes_line() {
		let mut cart = Cart::new();
		cart.add(line("p1", "v1", 2));
		assert!(cart.set_quantity("p1", "v1", 0));
		assert!(cart.is_empty());
		assert!(!cart.set_quantity("p1", "v1", 1));
	}

	#[test]
	fn totals_sum_across_lines() {
		let mut cart = Cart::new();
		cart.add(line("p1", "v1", 2));
		cart.add(line("p2", "v1", 1));
		assert_eq!(cart.unit_count(), 3);
		assert_eq!(cart.items_total(), Decimal::new(7500, 2));
	}
}
