//! File-based storage backend.
//!
//! Persists each key as a small JSON document under a configured
//! directory, carrying an optional expiry timestamp. This is the durable
//! analogue of the source UI's browser local storage: the session and
//! cart survive restarts, and expired auth records read as absent.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shop_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::fs;

/// On-disk envelope wrapping every stored value.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
	/// Unix expiry timestamp in seconds; 0 means the entry never expires.
	expires_at: u64,
	/// The stored bytes (JSON produced by the storage service).
	payload: Vec<u8>,
}

impl StoredEntry {
	fn new(payload: Vec<u8>, ttl: Option<Duration>) -> Result<Self, StorageError> {
		let expires_at = match ttl {
			None => 0,
			Some(ttl) if ttl.is_zero() => now_secs()?,
			Some(ttl) => now_secs()?.saturating_add(ttl.as_secs()),
		};
		Ok(Self {
			expires_at,
			payload,
		})
	}

	fn is_expired(&self) -> Result<bool, StorageError> {
		if self.expires_at == 0 {
			return Ok(false);
		}
		Ok(now_secs()? >= self.expires_at)
	}
}

fn now_secs() -> Result<u64, StorageError> {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.map_err(|e| StorageError::Backend(format!("System clock error: {}", e)))
}

/// File-based storage implementation.
///
/// Each key maps to one file under the configured directory. Keys may
/// contain only `[A-Za-z0-9:_-]`; the namespace separator `:` is mapped
/// to `__` in the filename.
pub struct FileStorage {
	/// Directory holding one file per key.
	storage_dir: PathBuf,
}

impl FileStorage {
	/// Creates a new FileStorage rooted at the given directory.
	pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
		Self {
			storage_dir: storage_dir.into(),
		}
	}

	fn file_path(&self, key: &str) -> Result<PathBuf, StorageError> {
		if key.is_empty()
			|| !key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-'))
		{
			return Err(StorageError::Backend(format!("Invalid storage key: {}", key)));
		}
		// "__" is reserved as the on-disk form of ':'; a key containing
		// it would collide with the file of the colon-separated key.
		if key.contains("__") {
			return Err(StorageError::Backend(format!("Invalid storage key: {}", key)));
		}
		let file_name = format!("{}.json", key.replace(':', "__"));
		Ok(self.storage_dir.join(file_name))
	}

	async fn read_entry(&self, key: &str) -> Result<StoredEntry, StorageError> {
		let path = self.file_path(key)?;
		let bytes = match fs::read(&path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(StorageError::NotFound)
			}
			Err(e) => return Err(StorageError::Backend(e.to_string())),
		};
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let entry = self.read_entry(key).await?;
		if entry.is_expired()? {
			// Expired entries read as absent; the file is removed lazily.
			let _ = fs::remove_file(self.file_path(key)?).await;
			tracing::debug!(key, "expired storage entry removed");
			return Err(StorageError::NotFound);
		}
		Ok(entry.payload)
	}

	async fn set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		ttl: Option<Duration>,
	) -> Result<(), StorageError> {
		let path = self.file_path(key)?;
		fs::create_dir_all(&self.storage_dir)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		let entry = StoredEntry::new(value, ttl)?;
		let bytes = serde_json::to_vec(&entry)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;

		// Write-then-rename so a crash never leaves a torn file behind
		let tmp_path = path.with_extension("json.tmp");
		fs::write(&tmp_path, &bytes)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		fs::rename(&tmp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.file_path(key)?;
		match fs::remove_file(&path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		match self.read_entry(key).await {
			Ok(entry) => Ok(!entry.is_expired()?),
			Err(StorageError::NotFound) => Ok(false),
			Err(e) => Err(e),
		}
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FileStorageSchema)
	}
}

/// Configuration schema for FileStorage.
pub struct FileStorageSchema;

impl ConfigSchema for FileStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("storage_path", FieldType::String).with_validator(|v| {
				match v.as_str() {
					Some(s) if !s.is_empty() => Ok(()),
					_ => Err("storage_path cannot be empty".to_string()),
				}
			})],
			vec![],
		);
		schema.validate(config)
	}
}

/// Factory function to create a file storage backend from configuration.
///
/// Configuration parameters:
/// - `storage_path`: directory to hold one file per key (required)
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	FileStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.ok_or_else(|| StorageError::Configuration("storage_path is required".into()))?;

	Ok(Box::new(FileStorage::new(storage_path)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[tokio::test]
	async fn round_trip_survives_reopen() {
		let dir = TempDir::new().unwrap();

		{
			let storage = FileStorage::new(dir.path());
			storage
				.set_bytes("auth:current", b"token".to_vec(), None)
				.await
				.unwrap();
		}

		let reopened = FileStorage::new(dir.path());
		assert_eq!(
			reopened.get_bytes("auth:current").await.unwrap(),
			b"token".to_vec()
		);
	}

	#[tokio::test]
	async fn expired_entry_is_removed_on_read() {
		let dir = TempDir::new().unwrap();
		let storage = FileStorage::new(dir.path());

		storage
			.set_bytes("auth:current", b"token".to_vec(), Some(Duration::ZERO))
			.await
			.unwrap();

		assert!(matches!(
			storage.get_bytes("auth:current").await,
			Err(StorageError::NotFound)
		));
		assert!(!storage.exists("auth:current").await.unwrap());
	}

	#[tokio::test]
	async fn delete_is_idempotent() {
		let dir = TempDir::new().unwrap();
		let storage = FileStorage::new(dir.path());

		storage.delete("cart:current").await.unwrap();
		storage
			.set_bytes("cart:current", b"{}".to_vec(), None)
			.await
			.unwrap();
		storage.delete("cart:current").await.unwrap();
		assert!(!storage.exists("cart:current").await.unwrap());
	}

	#[tokio::test]
	async fn rejects_path_traversal_keys() {
		let dir = TempDir::new().unwrap();
		let storage = FileStorage::new(dir.path());

		let result = storage.set_bytes("../escape", b"x".to_vec(), None).await;
		assert!(matches!(result, Err(StorageError::Backend(_))));
	}

	#[tokio::test]
	async fn rejects_keys_containing_the_reserved_separator_sequence() {
		let dir = TempDir::new().unwrap();
		let storage = FileStorage::new(dir.path());

		storage
			.set_bytes("auth:current", b"token".to_vec(), None)
			.await
			.unwrap();

		// "auth__current" would map to the same file as "auth:current"
		let result = storage.set_bytes("auth__current", b"x".to_vec(), None).await;
		assert!(matches!(result, Err(StorageError::Backend(_))));
		assert_eq!(
			storage.get_bytes("auth:current").await.unwrap(),
			b"token".to_vec()
		);
	}

	#[test]
	fn factory_requires_storage_path() {
		let config: toml::Value = toml::from_str("").unwrap();
		assert!(create_storage(&config).is_err());

		let config: toml::Value = toml::from_str("storage_path = \"/tmp/shop\"").unwrap();
		assert!(create_storage(&config).is_ok());
	}
}
