//! Storefront commands: catalog browsing, the cart, and checkout.

use crate::app::App;
use crate::commands::{guard, print_json};
use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use shop_core::{build_order_request, Route};
use shop_types::{CartItem, CheckoutForm, ListQuery};

/// Catalog browsing.
#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
	/// List published products
	List {
		/// 1-based page to fetch
		#[arg(long)]
		page: Option<u64>,
		/// Filter by category
		#[arg(long)]
		category: Option<String>,
		/// Free-text search
		#[arg(long)]
		search: Option<String>,
	},
	/// Show one product with its variants
	Show { id: String },
}

/// Cart management.
#[derive(Subcommand, Debug)]
pub enum CartCommand {
	/// Add a product variant to the cart
	Add {
		product_id: String,
		variant_id: String,
		/// Units to add
		#[arg(long, default_value_t = 1)]
		quantity: u32,
	},
	/// Remove a line from the cart
	Remove {
		product_id: String,
		variant_id: String,
	},
	/// Set the quantity of an existing line (0 removes it)
	Set {
		product_id: String,
		variant_id: String,
		quantity: u32,
	},
	/// Show the cart
	Show,
	/// Empty the cart
	Clear,
}

/// Shipping and contact details for checkout.
#[derive(Args, Debug)]
pub struct CheckoutArgs {
	/// Recipient name
	#[arg(long)]
	pub name: String,
	/// Recipient phone number
	#[arg(long)]
	pub phone: String,
	/// Contact email
	#[arg(long)]
	pub email: Option<String>,
	/// Street address
	#[arg(long)]
	pub address: String,
	/// City or town
	#[arg(long)]
	pub city: String,
	/// Region or state
	#[arg(long)]
	pub region: String,
	/// Landmark to help the rider
	#[arg(long)]
	pub landmark: Option<String>,
}

/// Runs a catalog command.
pub async fn products(app: &mut App, command: ProductsCommand) -> Result<()> {
	match command {
		ProductsCommand::List {
			page,
			category,
			search,
		} => {
			guard(app, Route::Storefront)?;
			let query = ListQuery {
				page,
				per_page: None,
				status: category,
				search,
			};
			let page = app.api.list_products(&query).await?;
			print_json(&page)
		}
		ProductsCommand::Show { id } => {
			guard(app, Route::ProductDetail)?;
			let product = app.api.get_product(&id).await?;
			print_json(&product)
		}
	}
}

/// Runs a cart command and persists the result.
pub async fn cart(app: &mut App, command: CartCommand) -> Result<()> {
	guard(app, Route::Cart)?;

	match command {
		CartCommand::Add {
			product_id,
			variant_id,
			quantity,
		} => {
			let product = app.api.get_product(&product_id).await?;
			let variant = product
				.variant(&variant_id)
				.ok_or_else(|| anyhow!("Product {} has no variant {}", product_id, variant_id))?;
			if quantity > variant.stock {
				bail!("Only {} in stock for variant {}", variant.stock, variant_id);
			}

			app.session.cart.add(CartItem {
				product_id: product.id.clone(),
				variant_id: variant.id.clone(),
				name: product.name.clone(),
				color: variant.color.clone(),
				size: variant.size.clone(),
				unit_price: variant.price,
				quantity,
				image: variant.primary_image().unwrap_or_default().to_string(),
			});
		}
		CartCommand::Remove {
			product_id,
			variant_id,
		} => {
			app.session.cart.remove(&product_id, &variant_id);
		}
		CartCommand::Set {
			product_id,
			variant_id,
			quantity,
		} => {
			if !app.session.cart.set_quantity(&product_id, &variant_id, quantity) {
				bail!("No cart line for product {} variant {}", product_id, variant_id);
			}
		}
		CartCommand::Show => {}
		CartCommand::Clear => app.session.cart.clear(),
	}

	app.save_session().await?;
	print_json(&app.session.cart)
}

/// Places an order from the cart; the cart is cleared only after the
/// backend accepts it.
pub async fn checkout(app: &mut App, args: CheckoutArgs) -> Result<()> {
	guard(app, Route::Checkout)?;

	let form = CheckoutForm {
		name: args.name,
		phone: args.phone,
		email: args.email,
		address: args.address,
		city: args.city,
		region: args.region,
		landmark: args.landmark,
	};

	let request = build_order_request(&app.session.cart, &form, &app.rules)?;
	let order = app.api.place_order(&request).await?;
	tracing::info!(order_id = %order.id, total = %order.total_price, "order placed");

	app.session.cart.clear();
	app.save_session().await?;

	print_json(&order)
}
