//! Authentication endpoints.

use crate::{ClientError, ShopApi};
use shop_types::{
	AuthResponse, CheckApprovalRequest, CheckApprovalResponse, GoogleLoginRequest, User,
};

impl ShopApi {
	/// Exchanges a Google identity credential for a bearer token and
	/// user record (`POST /auth/google`).
	///
	/// The caller installs the returned token via [`ShopApi::set_token`]
	/// and persists it in the session store.
	pub async fn login_with_google(&self, credential: &str) -> Result<AuthResponse, ClientError> {
		self.post_json(
			"/auth/google",
			&GoogleLoginRequest {
				credential: credential.to_string(),
			},
		)
		.await
	}

	/// Fetches the authenticated user (`GET /auth/me`).
	pub async fn me(&self) -> Result<User, ClientError> {
		self.get_json("/auth/me").await
	}

	/// Checks whether an email is on the back-office approval list
	/// (`POST /auth/check-approval`).
	pub async fn check_approval(&self, email: &str) -> Result<bool, ClientError> {
		let response: CheckApprovalResponse = self
			.post_json(
				"/auth/check-approval",
				&CheckApprovalRequest {
					email: email.to_string(),
				},
			)
			.await?;
		Ok(response.approved)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[tokio::test]
	async fn check_approval_unwraps_the_envelope() {
		let mut server = mockito::Server::new_async().await;
		let mock = server
			.mock("POST", "/auth/check-approval")
			.match_body(mockito::Matcher::JsonString(
				r#"{"email":"ops@example.com"}"#.into(),
			))
			.with_body(r#"{"success": true, "data": {"approved": false}}"#)
			.create_async()
			.await;

		let api = ShopApi::new(server.url(), Duration::from_secs(5)).unwrap();
		let approved = api.check_approval("ops@example.com").await.unwrap();

		assert!(!approved);
		mock.assert_async().await;
	}
}
