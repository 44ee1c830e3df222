//! Session state container.
//!
//! Holds the authenticated user, bearer token, and shopping cart as an
//! explicit value passed to whoever needs it, with serialization only at
//! the load/save boundaries of [`SessionStore`]. There is no ambient
//! global; the application owns one `Session` per run and persists it
//! deliberately.

use serde::{Deserialize, Serialize};
use shop_storage::{StorageError, StorageService};
use shop_types::{Cart, SecretString, StorageKey, User};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while persisting or loading the session.
#[derive(Debug, Error)]
pub enum SessionError {
	/// Error from the underlying storage backend.
	#[error("Session storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Cached authentication state: the logged-in user plus bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
	/// The authenticated user as last reported by the backend.
	pub user: User,
	/// Bearer token presented on every authenticated request.
	pub token: SecretString,
}

/// The application session: auth state and cart.
#[derive(Debug, Clone, Default)]
pub struct Session {
	/// Present while a user is logged in.
	pub auth: Option<AuthState>,
	/// The shopping cart. Survives logout so a returning shopper keeps
	/// their picks.
	pub cart: Cart,
}

impl Session {
	/// Returns true if a user is logged in.
	pub fn is_authenticated(&self) -> bool {
		self.auth.is_some()
	}

	/// The logged-in user, if any.
	pub fn user(&self) -> Option<&User> {
		self.auth.as_ref().map(|a| &a.user)
	}

	/// The bearer token, if logged in.
	pub fn token(&self) -> Option<&SecretString> {
		self.auth.as_ref().map(|a| &a.token)
	}

	/// Installs auth state after a successful login.
	pub fn login(&mut self, user: User, token: SecretString) {
		self.auth = Some(AuthState { user, token });
	}

	/// Drops auth state. The cart is kept.
	pub fn logout(&mut self) {
		self.auth = None;
	}
}

/// Persists the session through the storage service.
///
/// The auth record is stored with the configured TTL so an expired token
/// simply loads as a logged-out session; the cart is stored without TTL.
pub struct SessionStore {
	storage: Arc<StorageService>,
	token_ttl: Duration,
}

/// Well-known record id within each namespace; the store holds exactly
/// one session.
const CURRENT: &str = "current";

impl SessionStore {
	/// Creates a new SessionStore over the given storage service.
	pub fn new(storage: Arc<StorageService>, token_ttl: Duration) -> Self {
		Self { storage, token_ttl }
	}

	/// Loads the persisted session.
	///
	/// Missing or unreadable records degrade to their defaults (logged
	/// out, empty cart) rather than failing the run; a corrupt cache is
	/// disposable, not fatal.
	pub async fn load(&self) -> Result<Session, SessionError> {
		let auth = match self
			.storage
			.retrieve::<AuthState>(StorageKey::Auth.as_str(), CURRENT)
			.await
		{
			Ok(auth) => Some(auth),
			Err(StorageError::NotFound) => None,
			Err(StorageError::Serialization(e)) => {
				tracing::warn!(error = %e, "discarding unreadable auth record");
				None
			}
			Err(e) => return Err(e.into()),
		};

		let cart = match self
			.storage
			.retrieve::<Cart>(StorageKey::Cart.as_str(), CURRENT)
			.await
		{
			Ok(cart) => cart,
			Err(StorageError::NotFound) => Cart::new(),
			Err(StorageError::Serialization(e)) => {
				tracing::warn!(error = %e, "discarding unreadable cart record");
				Cart::new()
			}
			Err(e) => return Err(e.into()),
		};

		Ok(Session { auth, cart })
	}

	/// Persists the session.
	pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
		match &session.auth {
			Some(auth) => {
				self.storage
					.store_with_ttl(StorageKey::Auth.as_str(), CURRENT, auth, Some(self.token_ttl))
					.await?
			}
			None => self.storage.remove(StorageKey::Auth.as_str(), CURRENT).await?,
		}

		self.storage
			.store(StorageKey::Cart.as_str(), CURRENT, &session.cart)
			.await?;

		Ok(())
	}

	/// Removes every persisted record.
	pub async fn clear(&self) -> Result<(), SessionError> {
		for key in StorageKey::all() {
			self.storage.remove(key.as_str(), CURRENT).await?;
		}
		Ok(())
	}
}
