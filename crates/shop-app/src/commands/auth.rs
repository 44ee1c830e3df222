//! Login, logout and profile commands.

use crate::app::App;
use crate::commands::{guard, print_json};
use anyhow::Result;
use shop_core::Route;
use shop_types::{ProfileForm, SecretString};

/// Exchanges a Google credential for a session and persists it.
pub async fn login(app: &mut App, credential: &str) -> Result<()> {
	let auth = app.api.login_with_google(credential).await?;
	tracing::info!(user = %auth.user.email, role = %auth.user.role, "logged in");

	app.session
		.login(auth.user.clone(), SecretString::from(auth.token));
	app.api.set_token(app.session.token().cloned());
	app.save_session().await?;

	print_json(&auth.user)
}

/// Drops the auth record; the cart is kept for the next login.
pub async fn logout(app: &mut App) -> Result<()> {
	app.session.logout();
	app.api.set_token(None);
	app.save_session().await?;

	println!("Logged out");
	Ok(())
}

/// Looks up an email on the admin-login approval list. Shown on the
/// login screen before an admin credential exchange is attempted.
pub async fn check_approval(app: &mut App, email: &str) -> Result<()> {
	let approved = app.api.check_approval(email).await?;
	if approved {
		println!("{} is approved for admin login", email);
	} else {
		println!("{} is not approved for admin login", email);
	}
	Ok(())
}

/// Shows the logged-in user, refreshed from the backend.
pub async fn whoami(app: &mut App) -> Result<()> {
	if !app.session.is_authenticated() {
		println!("Not logged in");
		return Ok(());
	}

	let user = app.api.me().await?;
	print_json(&user)
}

/// Updates the profile and refreshes the cached user record.
pub async fn update_profile(
	app: &mut App,
	name: Option<String>,
	avatar: Option<String>,
) -> Result<()> {
	guard(app, Route::Profile)?;

	let user = app.api.update_profile(&ProfileForm { name, avatar }).await?;
	if let Some(auth) = app.session.auth.as_mut() {
		auth.user = user.clone();
	}
	app.save_session().await?;

	print_json(&user)
}
