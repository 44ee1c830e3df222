//! In-memory storage backend.
//!
//! This module provides a memory-based implementation of the
//! StorageInterface trait, useful for tests and ephemeral runs where
//! persistence across invocations is not required.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use shop_types::{ConfigSchema, Schema, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// In-memory storage implementation.
///
/// Stores data in a HashMap guarded by a read-write lock. Entries with a
/// TTL are dropped lazily on access once their deadline has passed.
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Entry>>>,
}

struct Entry {
	bytes: Vec<u8>,
	expires_at: Option<Instant>,
}

impl Entry {
	fn is_expired(&self) -> bool {
		self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
	}
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		{
			let store = self.store.read().await;
			match store.get(key) {
				Some(entry) if !entry.is_expired() => return Ok(entry.bytes.clone()),
				Some(_) => {}
				None => return Err(StorageError::NotFound),
			}
		}
		// Expired: drop the entry and report absence
		let mut store = self.store.write().await;
		store.remove(key);
		Err(StorageError::NotFound)
	}

	async fn set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		ttl: Option<Duration>,
	) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.insert(
			key.to_string(),
			Entry {
				bytes: value,
				expires_at: ttl.map(|d| Instant::now() + d),
			},
		);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let store = self.store.read().await;
		Ok(store.get(key).is_some_and(|entry| !entry.is_expired()))
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStorageSchema)
	}
}

/// Configuration schema for MemoryStorage.
pub struct MemoryStorageSchema;

impl ConfigSchema for MemoryStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory storage has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Factory function to create a memory storage backend from configuration.
///
/// Configuration parameters:
/// - None required for memory storage
pub fn create_storage(_config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	Ok(Box::new(MemoryStorage::new()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn basic_operations() {
		let storage = MemoryStorage::new();

		let key = "auth:current";
		let value = b"token".to_vec();
		storage.set_bytes(key, value.clone(), None).await.unwrap();

		let retrieved = storage.get_bytes(key).await.unwrap();
		assert_eq!(retrieved, value);
		assert!(storage.exists(key).await.unwrap());

		storage.delete(key).await.unwrap();
		assert!(!storage.exists(key).await.unwrap());
		assert!(matches!(
			storage.get_bytes(key).await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn expired_entry_reads_as_absent() {
		let storage = MemoryStorage::new();

		storage
			.set_bytes("auth:current", b"token".to_vec(), Some(Duration::ZERO))
			.await
			.unwrap();

		assert!(!storage.exists("auth:current").await.unwrap());
		assert!(matches!(
			storage.get_bytes("auth:current").await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn overwrite_replaces_value_and_ttl() {
		let storage = MemoryStorage::new();

		storage
			.set_bytes("cart:current", b"old".to_vec(), Some(Duration::ZERO))
			.await
			.unwrap();
		storage
			.set_bytes("cart:current", b"new".to_vec(), None)
			.await
			.unwrap();

		assert_eq!(storage.get_bytes("cart:current").await.unwrap(), b"new");
	}
}
