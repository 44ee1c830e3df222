//! Back-office commands.

use crate::app::App;
use crate::commands::{guard, print_json};
use anyhow::{Context, Result};
use clap::Subcommand;
use shop_core::Route;
use shop_types::{ListQuery, OrderStatus, ProductInput};
use std::path::PathBuf;

/// Back-office commands. All of these require an admin session.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
	/// Show dashboard aggregates
	Dashboard,
	/// List all orders across customers
	Orders {
		/// 1-based page to fetch
		#[arg(long)]
		page: Option<u64>,
		/// Filter by status
		#[arg(long)]
		status: Option<String>,
		/// Search by order id or customer name
		#[arg(long)]
		search: Option<String>,
	},
	/// Move an order to a new status
	Status {
		order_id: String,
		/// Target status (paid, shipped, delivered, undelivered, cancelled)
		status: String,
	},
	/// Assign an active rider to a paid order, shipping it
	Assign { order_id: String, rider_id: String },
	/// List delivery riders
	Riders,
	/// Manage the product catalog
	#[command(subcommand)]
	Catalog(CatalogCommand),
	/// Manage the admin-login approval list
	#[command(subcommand)]
	Approvals(ApprovalsCommand),
}

/// Catalog management commands. Product payloads are read from JSON
/// files matching the backend's product shape.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
	/// Create a product from a JSON payload file
	Create { file: PathBuf },
	/// Replace a product from a JSON payload file
	Update { id: String, file: PathBuf },
	/// Delete a product
	Delete { id: String },
}

/// Approval-list commands.
#[derive(Subcommand, Debug)]
pub enum ApprovalsCommand {
	/// List approved emails
	List,
	/// Add an email to the approval list
	Add { email: String },
	/// Remove an approval-list entry by id
	Remove { id: String },
}

/// Runs a back-office command.
pub async fn run(app: &mut App, command: AdminCommand) -> Result<()> {
	match command {
		AdminCommand::Dashboard => {
			guard(app, Route::AdminDashboard)?;
			let stats = app.api.dashboard().await?;
			print_json(&stats)
		}
		AdminCommand::Orders {
			page,
			status,
			search,
		} => {
			guard(app, Route::AdminOrders)?;
			let query = ListQuery {
				page,
				per_page: None,
				status,
				search,
			};
			let page = app.api.all_orders(&query).await?;
			print_json(&page)
		}
		AdminCommand::Status { order_id, status } => {
			guard(app, Route::AdminOrders)?;
			let status: OrderStatus = status.parse()?;
			let order = app.api.update_order_status(&order_id, status).await?;
			tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
			print_json(&order)
		}
		AdminCommand::Assign { order_id, rider_id } => {
			guard(app, Route::AdminOrders)?;
			let order = app.api.assign_rider(&order_id, &rider_id).await?;
			tracing::info!(order_id = %order.id, rider = %rider_id, "rider assigned");
			print_json(&order)
		}
		AdminCommand::Riders => {
			guard(app, Route::AdminRiders)?;
			let riders = app.api.list_riders().await?;
			print_json(&riders)
		}
		AdminCommand::Catalog(cmd) => {
			guard(app, Route::AdminProducts)?;
			match cmd {
				CatalogCommand::Create { file } => {
					let input = read_product_input(&file).await?;
					let product = app.api.create_product(&input).await?;
					print_json(&product)
				}
				CatalogCommand::Update { id, file } => {
					let input = read_product_input(&file).await?;
					let product = app.api.update_product(&id, &input).await?;
					print_json(&product)
				}
				CatalogCommand::Delete { id } => {
					app.api.delete_product(&id).await?;
					println!("Deleted");
					Ok(())
				}
			}
		}
		AdminCommand::Approvals(cmd) => {
			guard(app, Route::AdminApprovedEmails)?;
			match cmd {
				ApprovalsCommand::List => {
					let emails = app.api.approved_emails().await?;
					print_json(&emails)
				}
				ApprovalsCommand::Add { email } => {
					let entry = app.api.add_approved_email(&email).await?;
					print_json(&entry)
				}
				ApprovalsCommand::Remove { id } => {
					app.api.remove_approved_email(&id).await?;
					println!("Removed");
					Ok(())
				}
			}
		}
	}
}

/// Reads and parses a product payload file.
async fn read_product_input(path: &PathBuf) -> Result<ProductInput> {
	let content = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("reading product payload from {}", path.display()))?;
	let input = serde_json::from_str(&content)
		.with_context(|| format!("parsing product payload from {}", path.display()))?;
	Ok(input)
}
