//! Sub-builder for create-comment bodies.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	request::{BodyError, RequestBody},
};

/// Fluent builder producing a URL-encoded create-comment body.
#[derive(Clone, Debug, Default)]
pub struct CommentBuilder {
	author_id: Option<u64>,
	email: Option<String>,
	ip: Option<String>,
	name: Option<String>,
	url: Option<String>,
	user_agent: Option<String>,
	content: Option<String>,
	parent_id: Option<u64>,
	post_id: Option<u64>,
	date: Option<OffsetDateTime>,
}
impl CommentBuilder {
	/// Sets the commenting user.
	pub fn with_author(mut self, author_id: u64) -> Self {
		self.author_id = Some(author_id);

		self
	}

	/// Sets the comment author's email address.
	pub fn with_author_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}

	/// Sets the comment author's IP address.
	pub fn with_author_ip(mut self, ip: impl Into<String>) -> Self {
		self.ip = Some(ip.into());

		self
	}

	/// Sets the comment author's display name.
	pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the comment author's URL.
	pub fn with_author_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Sets the comment author's user agent.
	pub fn with_author_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Sets the comment content (required).
	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());

		self
	}

	/// Sets the parent comment.
	pub fn with_parent(mut self, parent_id: u64) -> Self {
		self.parent_id = Some(parent_id);

		self
	}

	/// Sets the post the comment belongs to (required).
	pub fn for_post(mut self, post_id: u64) -> Self {
		self.post_id = Some(post_id);

		self
	}

	/// Sets the comment date.
	pub fn with_date(mut self, instant: OffsetDateTime) -> Self {
		self.date = Some(instant);

		self
	}

	/// Produces the URL-encoded form body.
	pub fn build(self) -> Result<RequestBody, BodyError> {
		let content = self
			.content
			.filter(|content| !content.is_empty())
			.ok_or(BodyError::MissingField { field: "content" })?;
		let post_id = self.post_id.ok_or(BodyError::MissingField { field: "post" })?;
		let mut form = Vec::new();

		if let Some(author) = self.author_id {
			form.push(("author".into(), author.to_string()));
		}
		if let Some(email) = self.email {
			form.push(("author_email".into(), email));
		}
		if let Some(ip) = self.ip {
			form.push(("author_ip".into(), ip));
		}
		if let Some(name) = self.name {
			form.push(("author_name".into(), name));
		}
		if let Some(url) = self.url {
			form.push(("author_url".into(), url));
		}
		if let Some(user_agent) = self.user_agent {
			form.push(("author_user_agent".into(), user_agent));
		}

		form.push(("content".into(), content));

		if let Some(parent) = self.parent_id {
			form.push(("parent".into(), parent.to_string()));
		}

		form.push(("post".into(), post_id.to_string()));

		if let Some(formatted) = self.date.and_then(|instant| instant.format(&Rfc3339).ok()) {
			form.push(("date".into(), formatted));
		}

		Ok(RequestBody::Form(form))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn content_and_post_are_required() {
		assert_eq!(
			CommentBuilder::default()
				.for_post(9)
				.build()
				.expect_err("Comments without content must be rejected."),
			BodyError::MissingField { field: "content" },
		);
		assert_eq!(
			CommentBuilder::default()
				.with_content("Nice post!")
				.build()
				.expect_err("Comments without a post must be rejected."),
			BodyError::MissingField { field: "post" },
		);
	}

	#[test]
	fn minimal_comment_builds() {
		let body = CommentBuilder::default()
			.with_content("Nice post!")
			.for_post(9)
			.build()
			.expect("Comment body should build.");
		let RequestBody::Form(form) = body else {
			panic!("Comment bodies must be URL-encoded forms.");
		};

		assert_eq!(
			form,
			vec![
				("content".to_owned(), "Nice post!".to_owned()),
				("post".to_owned(), "9".to_owned()),
			],
		);
	}
}
