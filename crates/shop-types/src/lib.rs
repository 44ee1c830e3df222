//! Common types module for the shop client.
//!
//! This module defines the core data types and structures shared across
//! the storefront and back-office crates. It provides a centralized
//! location for domain entities and wire-contract types to ensure
//! consistency between the API client, the lifecycle core, and the
//! application layer.

/// Wire envelope and request/response types for the backend REST contract.
pub mod api;
/// Shopping cart types and merge semantics.
pub mod cart;
/// Checkout and profile form types with per-field validation.
pub mod forms;
/// Order, line item, and status lifecycle types.
pub mod order;
/// Product catalog and variant types.
pub mod product;
/// Delivery rider types.
pub mod rider;
/// Secret string type for bearer tokens.
pub mod secret_string;
/// Storage namespace keys for the persisted client state.
pub mod storage;
/// User identity and role types.
pub mod user;
/// Configuration validation schema types.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use cart::*;
pub use forms::*;
pub use order::*;
pub use product::*;
pub use rider::*;
pub use secret_string::SecretString;
pub use storage::*;
pub use user::*;
pub use validation::*;
