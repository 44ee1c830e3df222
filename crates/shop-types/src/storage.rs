//! Storage-related types for the persisted client state.

use std::str::FromStr;

/// Storage namespaces for the client-side persisted store.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants. The namespaces mirror
/// the two keys the source UI kept in browser local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Cached authentication state (user + bearer token).
	Auth,
	/// The shopping cart.
	Cart,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Auth => "auth",
			StorageKey::Cart => "cart",
		}
	}

	/// Returns an iterator over all StorageKey variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Auth, Self::Cart].into_iter()
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"auth" => Ok(Self::Auth),
			"cart" => Ok(Self::Cart),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}
