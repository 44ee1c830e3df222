//! Customer order commands.

use crate::app::App;
use crate::commands::{guard, print_json};
use anyhow::{bail, Result};
use clap::Subcommand;
use shop_core::{paginate, Actor, OrderFilter, Route};
use shop_types::{ListQuery, Order};

/// Own-order commands.
#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
	/// List your orders
	List {
		/// 1-based page to fetch
		#[arg(long)]
		page: Option<u64>,
		/// Filter by status (pending, paid, shipped, delivered, undelivered, cancelled)
		#[arg(long)]
		status: Option<String>,
		/// Narrow the fetched page by order id or recipient name
		#[arg(long)]
		search: Option<String>,
	},
	/// Show one order
	Show { id: String },
	/// Cancel an order still in pending or paid status
	Cancel { id: String },
}

/// Runs an own-order command.
pub async fn run(app: &mut App, command: OrdersCommand) -> Result<()> {
	guard(app, Route::MyOrders)?;

	match command {
		OrdersCommand::List {
			page,
			status,
			search,
		} => {
			let query = ListQuery {
				page,
				per_page: None,
				status,
				search: None,
			};
			let fetched = app.api.my_orders(&query).await?;

			// The customer endpoint has no search; narrow locally
			let result = match search {
				Some(needle) => {
					let filter = OrderFilter {
						status: None,
						search: Some(needle),
					};
					let kept: Vec<Order> = fetched
						.data
						.iter()
						.filter(|o| filter.matches(o))
						.cloned()
						.collect();
					let per_page = (kept.len() as u64).max(1);
					paginate(&kept, 1, per_page)
				}
				None => fetched,
			};
			print_json(&result)
		}
		OrdersCommand::Show { id } => {
			let order = app.api.get_order(&id).await?;
			print_json(&order)
		}
		OrdersCommand::Cancel { id } => {
			let actor = match app.session.user() {
				Some(user) => Actor::Customer {
					user_id: user.id.clone(),
				},
				None => bail!("Not logged in; run `shop login` first"),
			};
			let order = app.api.cancel_order(&id, &actor).await?;
			tracing::info!(order_id = %order.id, "order cancelled");
			print_json(&order)
		}
	}
}
