//! Sub-builder for create-category bodies.

// self
use crate::request::{BodyError, RequestBody, body::validate_slug};

/// Fluent builder producing a URL-encoded create-category body.
#[derive(Clone, Debug, Default)]
pub struct CategoryBuilder {
	name: Option<String>,
	description: Option<String>,
	slug: Option<String>,
	parent_id: Option<u64>,
}
impl CategoryBuilder {
	/// Sets the category name (required).
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the category description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the category slug.
	pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
		self.slug = Some(slug.into());

		self
	}

	/// Sets the parent category.
	pub fn with_parent(mut self, parent_id: u64) -> Self {
		self.parent_id = Some(parent_id);

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
		if let Some(parent) = self.parent_id {
			form.push(("parent".into(), parent.to_string()));
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
		let err = CategoryBuilder::default()
			.with_description("orphan")
			.build()
			.expect_err("Categories without a name must be rejected.");

		assert_eq!(err, BodyError::MissingField { field: "name" });
	}

	#[test]
	fn full_category_builds_in_order() {
		let body = CategoryBuilder::default()
			.with_name("News")
			.with_slug("news")
			.with_parent(2)
			.build()
			.expect("Category body should build.");
		let RequestBody::Form(form) = body else {
			panic!("Category bodies must be URL-encoded forms.");
		};

		assert_eq!(
			form,
			vec![
				("name".to_owned(), "News".to_owned()),
				("slug".to_owned(), "news".to_owned()),
				("parent".to_owned(), "2".to_owned()),
			],
		);
	}
}
