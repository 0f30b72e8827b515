//! Sub-builder for create-tag bodies.

// self
use crate::request::{BodyError, RequestBody, body::validate_slug};

/// Fluent builder producing a URL-encoded create-tag body.
#[derive(Clone, Debug, Default)]
pub struct TagBuilder {
	name: Option<String>,
	description: Option<String>,
	slug: Option<String>,
}
impl TagBuilder {
	/// Sets the tag name (required).
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the tag description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the tag slug.
	pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
		self.slug = Some(slug.into());

		self
	}

	/// Produces the URL-encoded form body.
	pub fn build(self) -> Result<RequestBody, BodyError> {
		let name = self
			.name
			.filter(|name| !name.is_empty())
			.ok_or(BodyError::MissingField { field: "name" })?;

		if let Some(slug) = self.slug.as_deref() {
			validate_slug(slug)?;
		}

		let mut form = vec![("name".to_owned(), name)];

		if let Some(description) = self.description {
			form.push(("description".into(), description));
		}
		if let Some(slug) = self.slug {
			form.push(("slug".into(), slug));
		}

		Ok(RequestBody::Form(form))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn name_is_required() {
		assert_eq!(
			TagBuilder::default().build().expect_err("Tags without a name must be rejected."),
			BodyError::MissingField { field: "name" },
		);
	}

	#[test]
	fn optional_fields_only_emit_when_set() {
		let body = TagBuilder::default()
			.with_name("rust")
			.build()
			.expect("Tag body should build.");
		let RequestBody::Form(form) = body else {
			panic!("Tag bodies must be URL-encoded forms.");
		};

		assert_eq!(form, vec![("name".to_owned(), "rust".to_owned())]);
	}
}
