//! Sub-builder for create-user bodies.

// self
use crate::request::{BodyError, RequestBody, body::validate_slug};

/// Fluent builder producing a URL-encoded create-user body.
#[derive(Clone, Debug, Default)]
pub struct UserBuilder {
	username: Option<String>,
	email: Option<String>,
	password: Option<String>,
	name: Option<String>,
	first_name: Option<String>,
	last_name: Option<String>,
	url: Option<String>,
	description: Option<String>,
	locale: Option<String>,
	nickname: Option<String>,
	slug: Option<String>,
	roles: Vec<String>,
}
impl UserBuilder {
	/// Sets the login name (required).
	pub fn with_username(mut self, username: impl Into<String>) -> Self {
		self.username = Some(username.into());

		self
	}

	/// Sets the email address (required).
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}

	/// Sets the account password (required).
	pub fn with_password(mut self, password: impl Into<String>) -> Self {
		self.password = Some(password.into());

		self
	}

	/// Sets the display name.
	pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the first name.
	pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
		self.first_name = Some(first_name.into());

		self
	}

	/// Sets the last name.
	pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
		self.last_name = Some(last_name.into());

		self
	}

	/// Sets the profile URL.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Sets the profile description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the account locale.
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());

		self
	}

	/// Sets the nickname.
	pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
		self.nickname = Some(nickname.into());

		self
	}

	/// Sets the user slug.
	pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
		self.slug = Some(slug.into());

		self
	}

	/// Assigns roles to the account.
	pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.roles.extend(roles.into_iter().map(Into::into));

		self
	}

	/// Produces the URL-encoded form body.
	pub fn build(self) -> Result<RequestBody, BodyError> {
		let username = self
			.username
			.filter(|username| !username.is_empty())
			.ok_or(BodyError::MissingField { field: "username" })?;
		let email = self
			.email
			.filter(|email| !email.is_empty())
			.ok_or(BodyError::MissingField { field: "email" })?;
		let password = self
			.password
			.filter(|password| !password.is_empty())
			.ok_or(BodyError::MissingField { field: "password" })?;

		if let Some(slug) = self.slug.as_deref() {
			validate_slug(slug)?;
		}

		let mut form = vec![
			("username".to_owned(), username),
			("email".to_owned(), email),
			("password".to_owned(), password),
		];

		if let Some(name) = self.name {
			form.push(("name".into(), name));
		}
		if let Some(first_name) = self.first_name {
			form.push(("first_name".into(), first_name));
		}
		if let Some(last_name) = self.last_name {
			form.push(("last_name".into(), last_name));
		}
		if let Some(url) = self.url {
			form.push(("url".into(), url));
		}
		if let Some(description) = self.description {
			form.push(("description".into(), description));
		}
		if let Some(locale) = self.locale {
			form.push(("locale".into(), locale));
		}
		if let Some(nickname) = self.nickname {
			form.push(("nickname".into(), nickname));
		}
		if let Some(slug) = self.slug {
			form.push(("slug".into(), slug));
		}
		if !self.roles.is_empty() {
			form.push(("roles".into(), self.roles.join(",")));
		}

		Ok(RequestBody::Form(form))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credentials_are_required() {
		assert_eq!(
			UserBuilder::default()
				.with_email("a@b.c")
				.with_password("pw")
				.build()
				.expect_err("Users without a username must be rejected."),
			BodyError::MissingField { field: "username" },
		);
		assert_eq!(
			UserBuilder::default()
				.with_username("alice")
				.with_password("pw")
				.build()
				.expect_err("Users without an email must be rejected."),
			BodyError::MissingField { field: "email" },
		);
		assert_eq!(
			UserBuilder::default()
				.with_username("alice")
				.with_email("a@b.c")
				.build()
				.expect_err("Users without a password must be rejected."),
			BodyError::MissingField { field: "password" },
		);
	}

	#[test]
	fn roles_join_with_commas() {
		let body = UserBuilder::default()
			.with_username("alice")
			.with_email("a@b.c")
			.with_password("pw")
			.with_roles(["editor", "author"])
			.build()
			.expect("User body should build.");
		let RequestBody::Form(form) = body else {
			panic!("User bodies must be URL-encoded forms.");
		};

		assert_eq!(form[0], ("username".to_owned(), "alice".to_owned()));
		assert_eq!(form.last(), Some(&("roles".to_owned(), "editor,author".to_owned())));
	}
}
