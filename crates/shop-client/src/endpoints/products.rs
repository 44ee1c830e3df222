//! Product catalog endpoints.

use crate::{ClientError, ShopApi};
use shop_types::{ListQuery, Paginated, Product, ProductInput};

impl ShopApi {
	/// Lists published products for the storefront (`GET /products`).
	pub async fn list_products(&self, query: &ListQuery) -> Result<Paginated<Product>, ClientError> {
		self.get_page("/products", query).await
	}

	/// Fetches one product (`GET /products/:id`).
	pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
		self.get_json(&format!("/products/{}", id)).await
	}

	/// Creates a product through the back-office (`POST /products`).
	pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
		self.post_json("/products", input).await
	}

	/// Updates a product through the back-office (`PATCH /products/:id`).
	pub async fn update_product(
		&self,
		id: &str,
		input: &ProductInput,
	) -> Result<Product, ClientError> {
		self.patch_json(&format!("/products/{}", id), input).await
	}

	/// Deletes a product through the back-office (`DELETE /products/:id`).
	pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
		// The backend answers `{ success: true, data: {} }` on deletion
		let _: serde_json::Value = self.delete_json(&format!("/products/{}", id)).await?;
		Ok(())
	}
}
