//! User and rider directory endpoints.

use crate::{ClientError, ShopApi};
use shop_types::{field_errors, ProfileForm, ProfileUpdateRequest, Rider, User};
use validator::Validate;

impl ShopApi {
	/// Lists delivery riders for assignment (`GET /users/riders`).
	pub async fn list_riders(&self) -> Result<Vec<Rider>, ClientError> {
		self.get_json("/users/riders").await
	}

	/// Updates the authenticated user's profile (`PATCH /users/profile`).
	///
	/// The form is validated locally first so bad input never leaves the
	/// process; backend rejections land in the same error category.
	pub async fn update_profile(&self, form: &ProfileForm) -> Result<User, ClientError> {
		if let Err(errors) = form.validate() {
			return Err(ClientError::Validation {
				fields: field_errors(&errors),
			});
		}

		self.patch_json(
			"/users/profile",
			&ProfileUpdateRequest {
				name: form.name.clone(),
				avatar: form.avatar.clone(),
			},
		)
		.await
	}
}
