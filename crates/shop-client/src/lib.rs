//! REST client for the shop backend.
//!
//! This crate consumes the backend's JSON contract: `{ success, data }`
//! envelopes on single-record endpoints and `{ data, meta }` pages on
//! list endpoints, with bearer-token authentication. Mutations follow
//! the fire-and-refetch discipline: the client never trusts its local
//! copy after a write; it re-fetches the authoritative record and hands
//! that to the caller. There is no retry and no backoff; a failure is
//! surfaced once and prior state is left untouched.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shop_core::LifecycleError;
use shop_types::{ApiEnvelope, Paginated, SecretString};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub mod endpoints {
	pub mod admin;
	pub mod auth;
	pub mod orders;
	pub mod products;
	pub mod users;
}

/// Errors surfaced by the API client, categorized the way the UI treats
/// them: per-field validation (inline), authorization (redirect to
/// login), request failure (banner), and local lifecycle rejections.
#[derive(Debug, Error)]
pub enum ClientError {
	/// The backend rejected a form; messages are keyed by field.
	#[error("Validation failed")]
	Validation {
		fields: HashMap<String, Vec<String>>,
	},
	/// Missing or expired credentials; the shell redirects to login.
	#[error("Not authorized")]
	Unauthorized,
	/// The backend refused the request.
	#[error("Request failed ({status}): {message}")]
	Api { status: u16, message: String },
	/// The request never completed (connection, timeout).
	#[error("Network error: {0}")]
	Transport(String),
	/// The response body did not match the contract.
	#[error("Unexpected response: {0}")]
	Decode(String),
	/// The operation was rejected locally before any request was sent.
	#[error(transparent)]
	Lifecycle(#[from] LifecycleError),
}

impl From<reqwest::Error> for ClientError {
	fn from(err: reqwest::Error) -> Self {
		ClientError::Transport(err.to_string())
	}
}

/// Typed client over the backend REST API.
///
/// Cheap to clone is not a goal; the application constructs one and
/// threads it through. The bearer token is installed after login and
/// attached to every subsequent request.
pub struct ShopApi {
	http: reqwest::Client,
	base_url: String,
	token: Option<SecretString>,
}

impl ShopApi {
	/// Creates a client for the given base URL.
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
		let http = reqwest::Client::builder()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(10)
			.timeout(timeout)
			.build()?;

		Ok(Self {
			http,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			token: None,
		})
	}

	/// Installs the bearer token used on subsequent requests.
	pub fn set_token(&mut self, token: Option<SecretString>) {
		self.token = token;
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		match &self.token {
			Some(token) => request.bearer_auth(token.expose_secret()),
			None => request,
		}
	}

	pub(crate) async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
	) -> Result<T, ClientError> {
		let response = self.authorize(self.http.get(self.url(path))).send().await?;
		Self::read_enveloped(response).await
	}

	pub(crate) async fn get_page<T: DeserializeOwned, Q: serde::Serialize>(
		&self,
		path: &str,
		query: &Q,
	) -> Result<Paginated<T>, ClientError> {
		let response = self
			.authorize(self.http.get(self.url(path)).query(query))
			.send()
			.await?;
		let status = response.status();
		let body = response.text().await?;
		parse_page(status, &body)
	}

	pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, ClientError> {
		let response = self
			.authorize(self.http.post(self.url(path)).json(body))
			.send()
			.await?;
		Self::read_enveloped(response).await
	}

	pub(crate) async fn patch_json<T: DeserializeOwned, B: serde::Serialize>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, ClientError> {
		let response = self
			.authorize(self.http.patch(self.url(path)).json(body))
			.send()
			.await?;
		Self::read_enveloped(response).await
	}

	pub(crate) async fn delete_json<T: DeserializeOwned>(
		&self,
		path: &str,
	) -> Result<T, ClientError> {
		let response = self
			.authorize(self.http.delete(self.url(path)))
			.send()
			.await?;
		Self::read_enveloped(response).await
	}

	async fn read_enveloped<T: DeserializeOwned>(
		response: reqwest::Response,
	) -> Result<T, ClientError> {
		let status = response.status();
		let body = response.text().await?;
		parse_envelope(status, &body)
	}
}

/// Unwraps a `{ success, data }` envelope from a response body.
///
/// Pure in (status, body) so the error mapping is testable without a
/// live server.
pub fn parse_envelope<T: DeserializeOwned>(
	status: StatusCode,
	body: &str,
) -> Result<T, ClientError> {
	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Err(ClientError::Unauthorized);
	}

	let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| {
		tracing::debug!(status = %status, "unparseable response body");
		ClientError::Decode(e.to_string())
	})?;

	if envelope.success {
		return envelope
			.data
			.ok_or_else(|| ClientError::Decode("success response without data".into()));
	}

	if let Some(fields) = envelope.errors {
		return Err(ClientError::Validation { fields });
	}

	Err(ClientError::Api {
		status: status.as_u16(),
		message: envelope
			.message
			.unwrap_or_else(|| "Request failed".to_string()),
	})
}

/// Unwraps a `{ data, meta }` page from a response body.
pub fn parse_page<T: DeserializeOwned>(
	status: StatusCode,
	body: &str,
) -> Result<Paginated<T>, ClientError> {
	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Err(ClientError::Unauthorized);
	}
	if !status.is_success() {
		// Failed list requests still use the mutation envelope
		let envelope: ApiEnvelope<serde_json::Value> =
			serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;
		return Err(ClientError::Api {
			status: status.as_u16(),
			message: envelope
				.message
				.unwrap_or_else(|| "Request failed".to_string()),
		});
	}

	serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_types::Order;

	#[test]
	fn success_envelope_yields_data() {
		let body = r#"{"success": true, "data": {"approved": true}}"#;
		let approved: shop_types::CheckApprovalResponse =
			parse_envelope(StatusCode::OK, body).unwrap();
		assert!(approved.approved);
	}

	#[test]
	fn unauthorized_maps_to_redirect_category() {
		let err = parse_envelope::<Order>(StatusCode::UNAUTHORIZED, "{}").unwrap_err();
		assert!(matches!(err, ClientError::Unauthorized));
	}

	#[test]
	fn field_errors_map_to_validation() {
		let body = r#"{
			"success": false,
			"message": "Validation failed",
			"errors": {"phone": ["Phone number is required"]}
		}"#;
		let err = parse_envelope::<Order>(StatusCode::UNPROCESSABLE_ENTITY, body).unwrap_err();
		match err {
			ClientError::Validation { fields } => {
				assert_eq!(fields["phone"], vec!["Phone number is required"]);
			}
			other => panic!("expected validation error, got {:?}", other),
		}
	}

	#[test]
	fn plain_failure_maps_to_api_error() {
		let body = r#"{"success": false, "message": "Order not found"}"#;
		let err = parse_envelope::<Order>(StatusCode::NOT_FOUND, body).unwrap_err();
		match err {
			ClientError::Api { status, message } => {
				assert_eq!(status, 404);
				assert_eq!(message, "Order not found");
			}
			other => panic!("expected api error, got {:?}", other),
		}
	}

	#[test]
	fn garbage_body_maps_to_decode_error() {
		let err = parse_envelope::<Order>(StatusCode::OK, "<html>bad gateway</html>").unwrap_err();
		assert!(matches!(err, ClientError::Decode(_)));
	}

	#[test]
	fn success_without_data_is_a_contract_violation() {
		let err = parse_envelope::<Order>(StatusCode::OK, r#"{"success": true}"#).unwrap_err();
		assert!(matches!(err, ClientError::Decode(_)));
	}

	#[test]
	fn page_parses_data_and_meta() {
		let body = r#"{"data": [], "meta": {"page": 1, "pages": 1, "total": 0}}"#;
		let page: Paginated<Order> = parse_page(StatusCode::OK, body).unwrap();
		assert_eq!(page.meta.total, 0);
	}

	#[test]
	fn failed_page_request_surfaces_message() {
		let body = r#"{"success": false, "message": "Server exploded"}"#;
		let err = parse_page::<Order>(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
		assert!(matches!(err, ClientError::Api { status: 500, .. }));
	}
}
