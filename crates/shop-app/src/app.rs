//! Application wiring: configuration into live components.
//!
//! Builds the storage backend named by the configuration through the
//! factory registry, restores the persisted session, and hands the
//! commands one [`App`] owning every component they touch.

use anyhow::{anyhow, Result};
use shop_client::ShopApi;
use shop_config::Config;
use shop_core::{CheckoutRules, Session, SessionStore};
use shop_storage::{get_all_implementations, StorageService};
use std::sync::Arc;
use std::time::Duration;

/// Live components of one invocation.
pub struct App {
	/// Typed client over the backend REST API.
	pub api: ShopApi,
	/// The restored session; mutated by commands and saved back.
	pub session: Session,
	/// Persists the session across invocations.
	pub store: SessionStore,
	/// Checkout pricing rules from configuration.
	pub rules: CheckoutRules,
}

impl std::fmt::Debug for App {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("App").finish_non_exhaustive()
	}
}

impl App {
	/// Wires all components from a validated configuration.
	pub async fn build(config: Config) -> Result<Self> {
		let store = build_session_store(&config)?;
		let session = store.load().await?;

		let mut api = ShopApi::new(
			config.api.base_url.clone(),
			Duration::from_secs(config.api.timeout_seconds),
		)?;
		api.set_token(session.token().cloned());

		let rules = CheckoutRules {
			shipping_fee: config.checkout.shipping_fee,
			free_shipping_threshold: config.checkout.free_shipping_threshold,
			tax_rate: config.checkout.tax_rate,
		};

		Ok(Self {
			api,
			session,
			store,
			rules,
		})
	}

	/// Persists the current session.
	pub async fn save_session(&self) -> Result<()> {
		self.store.save(&self.session).await?;
		Ok(())
	}
}

/// Instantiates the configured session storage backend.
fn build_session_store(config: &Config) -> Result<SessionStore> {
	let primary = &config.session.primary;
	let backend_config = config
		.session
		.implementations
		.get(primary)
		.ok_or_else(|| anyhow!("Primary session storage '{}' is not configured", primary))?;

	let (_, factory) = get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == primary.as_str())
		.ok_or_else(|| anyhow!("Unknown session storage implementation '{}'", primary))?;

	let backend = factory(backend_config)?;
	let storage = Arc::new(StorageService::new(backend));

	Ok(SessionStore::new(
		storage,
		Duration::from_secs(config.session.token_ttl_seconds),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_config::{ApiConfig, AppConfig, CheckoutConfig, SessionConfig};
	use std::collections::HashMap;
	use toml::Value;

	fn memory_config() -> Config {
		Config {
			app: AppConfig {
				id: "test-shop".to_string(),
			},
			api: ApiConfig {
				base_url: "http://localhost:4000/api/v1".to_string(),
				timeout_seconds: 30,
			},
			session: SessionConfig {
				primary: "memory".to_string(),
				implementations: {
					let mut map = HashMap::new();
					map.insert("memory".to_string(), Value::Table(toml::map::Map::new()));
					map
				},
				token_ttl_seconds: 3600,
			},
			checkout: CheckoutConfig::default(),
		}
	}

	#[tokio::test]
	async fn builds_app_from_memory_config() {
		let app = App::build(memory_config()).await.unwrap();
		assert!(!app.session.is_authenticated());
		assert!(app.session.cart.is_empty());
		assert_eq!(app.rules.shipping_fee, rust_decimal::Decimal::new(15, 0));
	}

	#[tokio::test]
	async fn unknown_backend_is_rejected() {
		let mut config = memory_config();
		config.session.primary = "redis".to_string();
		config.session.implementations.insert(
			"redis".to_string(),
			Value::Table(toml::map::Map::new()),
		);

		let err = App::build(config).await.unwrap_err();
		assert!(err.to_string().contains("Unknown session storage"));
	}

	#[tokio::test]
	async fn session_survives_across_builds_of_the_same_store() {
		let app = App::build(memory_config()).await.unwrap();
		app.save_session().await.unwrap();
		let loaded = app.store.load().await.unwrap();
		assert!(!loaded.is_authenticated());
	}
}
