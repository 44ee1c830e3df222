//! Configuration module for the shop client.
//!
//! This module provides structures and utilities for managing the
//! application configuration. It supports loading configuration from
//! TOML files, resolving `${VAR}` / `${VAR:-default}` environment
//! references, and validating that all required values are properly set
//! before any component is wired up.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Multi-file configuration loading with `include` directives.
pub mod loader;

pub use loader::ConfigLoader;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the shop client.
///
/// Contains all sections required for the application to operate:
/// client identity, the backend API endpoint, the persisted session
/// store, and checkout pricing rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this client instance.
	pub app: AppConfig,
	/// Configuration for the backend REST API.
	pub api: ApiConfig,
	/// Configuration for the persisted session store.
	pub session: SessionConfig,
	/// Checkout pricing rules.
	#[serde(default)]
	pub checkout: CheckoutConfig,
}

/// Configuration specific to this client instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
	/// Identifier for this client installation, used in log context.
	pub id: String,
}

/// Configuration for the backend REST API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Base URL of the backend, e.g. `https://api.example.com/api/v1`.
	pub base_url: String,
	/// Request timeout in seconds.
	#[serde(default = "default_api_timeout")]
	pub timeout_seconds: u64,
}

/// Returns the default API timeout in seconds.
fn default_api_timeout() -> u64 {
	30
}

/// Configuration for the persisted session store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
	/// Which storage implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
	/// Lifetime of a cached auth record in seconds. An expired record
	/// loads as a logged-out session.
	#[serde(default = "default_token_ttl_seconds")]
	pub token_ttl_seconds: u64,
}

/// Returns the default auth record lifetime: 7 days, matching the
/// backend's token expiry.
fn default_token_ttl_seconds() -> u64 {
	7 * 24 * 3600
}

/// Checkout pricing rules.
///
/// The backend recomputes and persists authoritative totals; these values
/// drive the client-side summary shown before the order is placed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutConfig {
	/// Flat shipping fee applied below the free-shipping threshold.
	#[serde(default = "default_shipping_fee")]
	pub shipping_fee: Decimal,
	/// Order item total at or above which shipping is free.
	#[serde(default = "default_free_shipping_threshold")]
	pub free_shipping_threshold: Decimal,
	/// Tax rate applied to the item total, as a fraction (0.05 = 5%).
	#[serde(default = "default_tax_rate")]
	pub tax_rate: Decimal,
}

impl Default for CheckoutConfig {
	fn default() -> Self {
		Self {
			shipping_fee: default_shipping_fee(),
			free_shipping_threshold: default_free_shipping_threshold(),
			tax_rate: default_tax_rate(),
		}
	}
}

fn default_shipping_fee() -> Decimal {
	Decimal::new(15, 0)
}

fn default_free_shipping_threshold() -> Decimal {
	Decimal::new(200, 0)
}

fn default_tax_rate() -> Decimal {
	Decimal::ZERO
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable
/// VAR_NAME. Supports default values with `${VAR_NAME:-default_value}`.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file, following `include`
	/// directives, resolving environment references and validating the
	/// result.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let path = std::path::Path::new(path);
		let base = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => std::path::PathBuf::from("."),
		};
		let file_name = path.file_name().ok_or_else(|| {
			ConfigError::Validation(format!("Invalid configuration path: {}", path.display()))
		})?;

		let mut loader = ConfigLoader::new(base);
		loader.load_config(file_name).await
	}

	/// Validates the configuration to ensure all required fields are
	/// properly set:
	/// - the client id is not empty
	/// - the API base URL is a usable http(s) URL
	/// - the primary session backend is configured
	/// - the token TTL and tax rate are within sane bounds
	fn validate(&self) -> Result<(), ConfigError> {
		if self.app.id.is_empty() {
			return Err(ConfigError::Validation("App id cannot be empty".into()));
		}

		if self.api.base_url.is_empty() {
			return Err(ConfigError::Validation(
				"API base_url cannot be empty".into(),
			));
		}
		if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"API base_url must be an http(s) URL, got '{}'",
				self.api.base_url
			)));
		}
		if self.api.timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"API timeout_seconds must be greater than 0".into(),
			));
		}

		if self.session.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one session storage implementation must be configured".into(),
			));
		}
		if !self
			.session
			.implementations
			.contains_key(&self.session.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary session storage '{}' not found in implementations",
				self.session.primary
			)));
		}
		if self.session.token_ttl_seconds == 0 {
			return Err(ConfigError::Validation(
				"Session token_ttl_seconds must be greater than 0".into(),
			));
		}

		if self.checkout.tax_rate < Decimal::ZERO || self.checkout.tax_rate >= Decimal::ONE {
			return Err(ConfigError::Validation(
				"Checkout tax_rate must be in [0, 1)".into(),
			));
		}
		if self.checkout.shipping_fee < Decimal::ZERO {
			return Err(ConfigError::Validation(
				"Checkout shipping_fee cannot be negative".into(),
			));
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	const BASE_CONFIG: &str = r#"
[app]
id = "shop-client"

[api]
base_url = "http://localhost:4000/api/v1"

[session]
primary = "memory"
[session.implementations.memory]
"#;

	#[test]
	fn parses_minimal_config_with_defaults() {
		let config: Config = BASE_CONFIG.parse().unwrap();
		assert_eq!(config.app.id, "shop-client");
		assert_eq!(config.api.timeout_seconds, 30);
		assert_eq!(config.session.token_ttl_seconds, 7 * 24 * 3600);
		assert_eq!(config.checkout.shipping_fee, Decimal::new(15, 0));
		assert_eq!(config.checkout.tax_rate, Decimal::ZERO);
	}

	#[test]
	fn rejects_unknown_primary_session_backend() {
		let content = r#"
[app]
id = "shop-client"

[api]
base_url = "http://localhost:4000"

[session]
primary = "file"
[session.implementations.memory]
"#;
		let err = content.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("Primary session storage"));
	}

	#[test]
	fn rejects_non_http_base_url() {
		let content = BASE_CONFIG.replace("http://localhost:4000/api/v1", "localhost:4000");
		let err = content.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("http(s)"));
	}

	#[test]
	fn rejects_bad_tax_rate() {
		let content = format!("{}\n[checkout]\ntax_rate = 1.5\n", BASE_CONFIG);
		let err = content.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("tax_rate"));
	}

	#[test]
	fn resolves_env_vars_with_defaults() {
		let content = r#"
[app]
id = "${SHOP_APP_ID:-shop-client}"

[api]
base_url = "${SHOP_API_URL:-http://localhost:4000}"

[session]
primary = "memory"
[session.implementations.memory]
"#;
		let resolved = resolve_env_vars(content).unwrap();
		let config: Config = resolved.parse().unwrap();
		assert_eq!(config.app.id, "shop-client");
		assert_eq!(config.api.base_url, "http://localhost:4000");
	}

	#[test]
	fn missing_env_var_without_default_errors() {
		let result = resolve_env_vars("id = \"${SHOP_DEFINITELY_UNSET_VAR}\"");
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn loads_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(BASE_CONFIG.as_bytes()).unwrap();
		let config = Config::from_file(file.path().to_str().unwrap())
			.await
			.unwrap();
		assert_eq!(config.session.primary, "memory");
	}
}
