//! Sub-builder for create-post bodies.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	request::{BodyError, RequestBody, body::validate_slug},
};

/// Publication status assigned to a new post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PostStatus {
	/// Publicly visible.
	Publish,
	/// Scheduled for a future date.
	Future,
	/// Draft, not visible.
	Draft,
	/// Awaiting review.
	#[default]
	Pending,
	/// Visible to authorized users only.
	Private,
}
impl PostStatus {
	const fn as_str(self) -> &'static str {
		match self {
			PostStatus::Publish => "publish",
			PostStatus::Future => "future",
			PostStatus::Draft => "draft",
			PostStatus::Pending => "pending",
			PostStatus::Private => "private",
		}
	}
}

/// Open/closed toggle used for comment and ping statuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscussionStatus {
	/// Accepting new entries.
	#[default]
	Open,
	/// Closed to new entries.
	Closed,
}
impl DiscussionStatus {
	const fn as_str(self) -> &'static str {
		match self {
			DiscussionStatus::Open => "open",
			DiscussionStatus::Closed => "closed",
		}
	}
}

/// Presentation format assigned to a new post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PostFormat {
	#[default]
	Standard,
	Aside,
	Chat,
	Gallery,
	Link,
	Image,
	Quote,
	Status,
	Video,
	Audio,
}
impl PostFormat {
	const fn as_str(self) -> &'static str {
		match self {
			PostFormat::Standard => "standard",
			PostFormat::Aside => "aside",
			PostFormat::Chat => "chat",
			PostFormat::Gallery => "gallery",
			PostFormat::Link => "link",
			PostFormat::Image => "image",
			PostFormat::Quote => "quote",
			PostFormat::Status => "status",
			PostFormat::Video => "video",
			PostFormat::Audio => "audio",
		}
	}
}

/// Fluent builder producing a URL-encoded create-post body.
#[derive(Clone, Debug, Default)]
pub struct PostBuilder {
	content: Option<String>,
	title: Option<String>,
	date: Option<OffsetDateTime>,
	slug: Option<String>,
	status: PostStatus,
	password: Option<String>,
	author_id: Option<u64>,
	excerpt: Option<String>,
	featured_image_id: Option<u64>,
	comment_status: DiscussionStatus,
	ping_status: DiscussionStatus,
	format: PostFormat,
	sticky: bool,
	categories: Vec<i64>,
	tags: Vec<i64>,
}
impl PostBuilder {
	/// Sets the post title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Sets the post content.
	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());

		self
	}

	/// Sets the publication date.
	pub fn with_date(mut self, instant: OffsetDateTime) -> Self {
		self.date = Some(instant);

		self
	}

	/// Sets the post slug.
	pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
		self.slug = Some(slug.into());

		self
	}

	/// Sets the publication status; defaults to [`PostStatus::Pending`].
	pub fn with_status(mut self, status: PostStatus) -> Self {
		self.status = status;

		self
	}

	/// Password-protects the post.
	pub fn with_password(mut self, password: impl Into<String>) -> Self {
		self.password = Some(password.into());

		self
	}

	/// Sets the authoring user.
	pub fn with_author(mut self, author_id: u64) -> Self {
		self.author_id = Some(author_id);

		self
	}

	/// Sets the post excerpt.
	pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
		self.excerpt = Some(excerpt.into());

		self
	}

	/// Sets the featured media attachment.
	pub fn with_featured_image(mut self, media_id: u64) -> Self {
		self.featured_image_id = Some(media_id);

		self
	}

	/// Sets the comment status; defaults to open.
	pub fn with_comment_status(mut self, status: DiscussionStatus) -> Self {
		self.comment_status = status;

		self
	}

	/// Sets the ping status; defaults to open.
	pub fn with_ping_status(mut self, status: DiscussionStatus) -> Self {
		self.ping_status = status;

		self
	}

	/// Sets the presentation format; defaults to standard.
	pub fn with_format(mut self, format: PostFormat) -> Self {
		self.format = format;

		self
	}

	/// Marks the post sticky.
	pub fn keep_sticky(mut self, sticky: bool) -> Self {
		self.sticky = sticky;

		self
	}

	/// Assigns categories to the post.
	pub fn with_categories(mut self, categories: impl IntoIterator<Item = i64>) -> Self {
		self.categories.extend(categories);

		self
	}

	/// Assigns tags to the post.
	pub fn with_tags(mut self, tags: impl IntoIterator<Item = i64>) -> Self {
		self.tags.extend(tags);

		self
	}

	/// Produces the URL-encoded form body.
	pub fn build(self) -> Result<RequestBody, BodyError> {
		if let Some(slug) = self.slug.as_deref() {
			validate_slug(slug)?;
		}

		let mut form = Vec::new();

		if let Some(content) = self.content {
			form.push(("content".into(), content));
		}
		if let Some(title) = self.title {
			form.push(("title".into(), title));
		}
		if let Some(slug) = self.slug {
			form.push(("slug".into(), slug));
		}
		if let Some(password) = self.password {
			form.push(("password".into(), password));
		}
		if let Some(author) = self.author_id {
			form.push(("author".into(), author.to_string()));
		}
		if let Some(excerpt) = self.excerpt {
			form.push(("excerpt".into(), excerpt));
		}
		if let Some(media) = self.featured_image_id {
			form.push(("featured_media".into(), media.to_string()));
		}
		if self.sticky {
			form.push(("sticky".into(), "1".into()));
		}
		if !self.categories.is_empty() {
			form.push((
				"categories".into(),
				self.categories.iter().map(i64::to_string).collect::<Vec<_>>().join(","),
			));
		}
		if !self.tags.is_empty() {
			form.push((
				"tags".into(),
				self.tags.iter().map(i64::to_string).collect::<Vec<_>>().join(","),
			));
		}
		if let Some(formatted) = self.date.and_then(|instant| instant.format(&Rfc3339).ok()) {
			form.push(("date".into(), formatted));
		}

		form.push(("comment_status".into(), self.comment_status.as_str().into()));
		form.push(("ping_status".into(), self.ping_status.as_str().into()));
		form.push(("format".into(), self.format.as_str().into()));
		form.push(("status".into(), self.status.as_str().into()));

		Ok(RequestBody::Form(form))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_emit_only_the_fixed_trailer() {
		let body = PostBuilder::default().build().expect("Default post body should build.");
		let RequestBody::Form(form) = body else {
			panic!("Post bodies must be URL-encoded forms.");
		};

		assert_eq!(
			form,
			vec![
				("comment_status".to_owned(), "open".to_owned()),
				("ping_status".to_owned(), "open".to_owned()),
				("format".to_owned(), "standard".to_owned()),
				("status".to_owned(), "pending".to_owned()),
			],
		);
	}

	#[test]
	fn configured_fields_precede_the_trailer() {
		let body = PostBuilder::default()
			.with_title("Hello")
			.with_content("World")
			.with_status(PostStatus::Publish)
			.with_categories([3, 5])
			.build()
			.expect("Post body should build.");
		let RequestBody::Form(form) = body else {
			panic!("Post bodies must be URL-encoded forms.");
		};

		assert_eq!(form[0], ("content".to_owned(), "World".to_owned()));
		assert_eq!(form[1], ("title".to_owned(), "Hello".to_owned()));
		assert!(form.contains(&("categories".to_owned(), "3,5".to_owned())));
		assert_eq!(form.last(), Some(&("status".to_owned(), "publish".to_owned())));
	}

	#[test]
	fn invalid_slug_is_rejected() {
		let err = PostBuilder::default()
			.with_slug("not a slug")
			.build()
			.expect_err("Whitespace slugs must be rejected.");

		assert!(matches!(err, BodyError::InvalidSlug { .. }));
	}
}
