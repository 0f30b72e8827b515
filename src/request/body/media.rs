//! Sub-builder for create-media (upload) bodies.
//!
//! Media uploads travel as raw bytes with a caller-supplied content type; MIME lookup tables
//! are deliberately out of scope. Descriptive attributes ride along as upload headers.

// self
use crate::request::{BodyError, RequestBody};

/// Fluent builder producing a raw-bytes upload body.
#[derive(Clone, Debug, Default)]
pub struct MediaBuilder {
	content: Option<Vec<u8>>,
	content_type: Option<String>,
	file_name: Option<String>,
	alt_text: Option<String>,
	caption: Option<String>,
	description: Option<String>,
	associated_post_id: Option<u64>,
	title: Option<String>,
	author_id: Option<u64>,
}
impl MediaBuilder {
	/// Supplies the upload payload with its content type and advertised file name.
	pub fn with_file(
		mut self,
		content: impl Into<Vec<u8>>,
		content_type: impl Into<String>,
		file_name: impl Into<String>,
	) -> Self {
		self.content = Some(content.into());
		self.content_type = Some(content_type.into());
		self.file_name = Some(file_name.into());

		self
	}

	/// Sets the alternative text.
	pub fn with_alternate_text(mut self, text: impl Into<String>) -> Self {
		self.alt_text = Some(text.into());

		self
	}

	/// Sets the caption.
	pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = Some(caption.into());

		self
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Associates the upload with a post.
	pub fn with_associated_post(mut self, post_id: u64) -> Self {
		self.associated_post_id = Some(post_id);

		self
	}

	/// Sets the attachment title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Sets the authoring user.
	pub fn with_author(mut self, author_id: u64) -> Self {
		self.author_id = Some(author_id);

		self
	}

	/// Produces the raw-bytes upload body.
	pub fn build(self) -> Result<RequestBody, BodyError> {
		let content = self.content.ok_or(BodyError::MissingField { field: "file" })?;
		let content_type =
			self.content_type.ok_or(BodyError::MissingField { field: "content type" })?;
		let file_name = self
			.file_name
			.filter(|file_name| !file_name.is_empty())
			.ok_or(BodyError::MissingField { field: "file name" })?;
		let mut attributes = Vec::new();

		if let Some(alt_text) = self.alt_text {
			attributes.push(("alt_text".into(), alt_text));
		}
		if let Some(caption) = self.caption {
			attributes.push(("caption".into(), caption));
		}
		if let Some(description) = self.description {
			attributes.push(("description".into(), description));
		}
		if let Some(post) = self.associated_post_id {
			attributes.push(("post".into(), post.to_string()));
		}
		if let Some(title) = self.title {
			attributes.push(("title".into(), title));
		}
		if let Some(author) = self.author_id {
			attributes.push(("author".into(), author.to_string()));
		}

		Ok(RequestBody::Bytes { content_type, file_name, content, attributes })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn file_payload_is_required() {
		assert_eq!(
			MediaBuilder::default()
				.with_title("cover")
				.build()
				.expect_err("Uploads without a payload must be rejected."),
			BodyError::MissingField { field: "file" },
		);
	}

	#[test]
	fn attributes_ride_along_with_the_payload() {
		let body = MediaBuilder::default()
			.with_file(vec![0xde, 0xad], "image/png", "cover.png")
			.with_alternate_text("A cover image")
			.with_associated_post(12)
			.build()
			.expect("Media body should build.");
		let RequestBody::Bytes { content_type, file_name, content, attributes } = body else {
			panic!("Media bodies must be raw bytes.");
		};

		assert_eq!(content_type, "image/png");
		assert_eq!(file_name, "cover.png");
		assert_eq!(content, vec![0xde, 0xad]);
		assert_eq!(
			attributes,
			vec![
				("alt_text".to_owned(), "A cover image".to_owned()),
				("post".to_owned(), "12".to_owned()),
			],
		);
	}
}
