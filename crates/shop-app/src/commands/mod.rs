//! Command surface of the shop binary.
//!
//! One subcommand per screen of the source application. Every command
//! evaluates the route guard against the restored session before doing
//! anything, exactly as the navigation shell would.

use crate::app::App;
use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;
use shop_core::{GuardOutcome, Route, RouteGuard};

pub mod admin;
pub mod auth;
pub mod orders;
pub mod storefront;

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Log in with a Google identity credential
	Login {
		/// The identity credential obtained from the Google flow
		credential: String,
	},
	/// Log out (the cart is kept)
	Logout,
	/// Check whether an email may complete an admin login
	CheckApproval {
		/// Email to look up on the approval list
		email: String,
	},
	/// Show the logged-in user
	Whoami,
	/// Update the profile of the logged-in user
	Profile {
		/// New display name
		#[arg(long)]
		name: Option<String>,
		/// New avatar URL
		#[arg(long)]
		avatar: Option<String>,
	},
	/// Browse the product catalog
	#[command(subcommand)]
	Products(storefront::ProductsCommand),
	/// Manage the shopping cart
	#[command(subcommand)]
	Cart(storefront::CartCommand),
	/// Place an order from the cart
	Checkout(storefront::CheckoutArgs),
	/// View and cancel your own orders
	#[command(subcommand)]
	Orders(orders::OrdersCommand),
	/// Back-office operations
	#[command(subcommand)]
	Admin(admin::AdminCommand),
}

/// Dispatches a parsed command.
pub async fn run(app: &mut App, command: Command) -> Result<()> {
	match command {
		Command::Login { credential } => auth::login(app, &credential).await,
		Command::Logout => auth::logout(app).await,
		Command::CheckApproval { email } => auth::check_approval(app, &email).await,
		Command::Whoami => auth::whoami(app).await,
		Command::Profile { name, avatar } => auth::update_profile(app, name, avatar).await,
		Command::Products(cmd) => storefront::products(app, cmd).await,
		Command::Cart(cmd) => storefront::cart(app, cmd).await,
		Command::Checkout(args) => storefront::checkout(app, args).await,
		Command::Orders(cmd) => orders::run(app, cmd).await,
		Command::Admin(cmd) => admin::run(app, cmd).await,
	}
}

/// Evaluates the route guard, turning non-Allow outcomes into errors.
pub(crate) fn guard(app: &App, route: Route) -> Result<()> {
	match RouteGuard::evaluate(route, &app.session) {
		GuardOutcome::Allow => Ok(()),
		GuardOutcome::RedirectToLogin => bail!("Not logged in; run `shop login` first"),
		GuardOutcome::Forbidden => bail!("Your account is not permitted to do this"),
	}
}

/// Prints a value as pretty JSON, the output format of every command.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
