//! Product catalog types.
//!
//! A product groups one or more purchasable variants (SKUs). The catalog
//! is owned by the backend; the client reads it for the storefront and
//! mutates it only through the back-office product surface.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Opaque identifier assigned by the backend.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Long-form description.
	#[serde(default)]
	pub description: String,
	/// Category used for storefront filtering.
	pub category: String,
	/// Optional brand name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub brand: Option<String>,
	/// Purchasable variants. A product always has at least one.
	pub variants: Vec<Variant>,
	/// Whether the product is visible on the storefront.
	#[serde(default = "default_published")]
	pub is_published: bool,
	/// Unix timestamp when the product was created.
	pub created_at: i64,
}

fn default_published() -> bool {
	true
}

impl Product {
	/// Looks up a variant by id.
	pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
		self.variants.iter().find(|v| v.id == variant_id)
	}

	/// Lowest variant price, used for "from" pricing on product cards.
	pub fn min_price(&self) -> Option<Decimal> {
		self.variants.iter().map(|v| v.price).min()
	}
}

/// A purchasable SKU of a product: a color/size/price/stock combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
	/// Opaque identifier assigned by the backend.
	pub id: String,
	/// Variant color.
	pub color: String,
	/// Variant size.
	pub size: String,
	/// Unit price.
	pub price: Decimal,
	/// Units in stock.
	pub stock: u32,
	/// Image URLs for this variant.
	#[serde(default)]
	pub images: Vec<String>,
}

impl Variant {
	/// Returns the primary image, if any.
	pub fn primary_image(&self) -> Option<&str> {
		self.images.first().map(String::as_str)
	}
}

/// Payload for creating or replacing a product through the back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub category: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub brand: Option<String>,
	pub variants: Vec<VariantInput>,
	#[serde(default = "default_published")]
	pub is_published: bool,
}

/// Payload for a variant within a [`ProductInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
	pub color: String,
	pub size: String,
	pub price: Decimal,
	pub stock: u32,
	#[serde(default)]
	pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn variant(id: &str, price: Decimal) -> Variant {
		Variant {
			id: id.into(),
			color: "silver".into(),
			size: "standard".into(),
			price,
			stock: 5,
			images: vec![],
		}
	}

	#[test]
	fn min_price_picks_cheapest_variant() {
		let product = Product {
			id: "p1".into(),
			name: "Blender".into(),
			description: String::new(),
			category: "appliances".into(),
			brand: None,
			variants: vec![
				variant("v1", Decimal::new(4500, 2)),
				variant("v2", Decimal::new(3999, 2)),
			],
			is_published: true,
			created_at: 0,
		};
		assert_eq!(product.min_price(), Some(Decimal::new(3999, 2)));
		assert!(product.variant("v2").is_some());
		assert!(product.variant("v9").is_none());
	}
}
