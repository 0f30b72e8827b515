//! Tolerant resource models.
//!
//! These cover the fields the typed operations exercise; unknown fields are ignored and
//! optional members fall back to their defaults so partial API responses still deserialize.

// self
use crate::_prelude::*;

/// Wrapper for fields the API delivers pre-rendered, e.g. a post title or body.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Rendered {
	/// Rendered HTML content.
	#[serde(default)]
	pub rendered: String,
	/// Whether the content is password protected.
	#[serde(default, alias = "_protected")]
	pub protected: bool,
}

/// A published or draft post.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Post {
	/// Unique identifier.
	pub id: i64,
	/// Publication date in the site's timezone, RFC 3339.
	#[serde(default)]
	pub date: Option<String>,
	/// Publication date as GMT, RFC 3339.
	#[serde(default)]
	pub date_gmt: Option<String>,
	/// Last modification date, RFC 3339.
	#[serde(default)]
	pub modified: Option<String>,
	/// URL-friendly identifier.
	#[serde(default)]
	pub slug: String,
	/// Publication status, e.g. `publish` or `draft`.
	#[serde(default)]
	pub status: String,
	/// Permalink.
	#[serde(default)]
	pub link: String,
	/// Rendered title.
	#[serde(default)]
	pub title: Rendered,
	/// Rendered body.
	#[serde(default)]
	pub content: Rendered,
	/// Rendered excerpt.
	#[serde(default)]
	pub excerpt: Rendered,
	/// Author identifier.
	#[serde(default)]
	pub author: i64,
	/// Featured media identifier, `0` when unset.
	#[serde(default)]
	pub featured_media: i64,
	/// Whether the post is comment-enabled, `open` or `closed`.
	#[serde(default)]
	pub comment_status: String,
	/// Whether the post accepts pings, `open` or `closed`.
	#[serde(default)]
	pub ping_status: String,
	/// Whether the post is pinned to the top of listings.
	#[serde(default)]
	pub sticky: bool,
	/// Post format, e.g. `standard`.
	#[serde(default)]
	pub format: String,
	/// Assigned category identifiers.
	#[serde(default)]
	pub categories: Vec<i64>,
	/// Assigned tag identifiers.
	#[serde(default)]
	pub tags: Vec<i64>,
}

/// A registered account.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct User {
	/// Unique identifier.
	pub id: i64,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Site URL supplied by the user.
	#[serde(default)]
	pub url: String,
	/// Profile description.
	#[serde(default)]
	pub description: String,
	/// Profile permalink.
	#[serde(default)]
	pub link: String,
	/// URL-friendly identifier.
	#[serde(default)]
	pub slug: String,
	/// Avatar URLs keyed by pixel size.
	#[serde(default)]
	pub avatar_urls: HashMap<String, String>,
}

/// A reader comment attached to a post.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Comment {
	/// Unique identifier.
	pub id: i64,
	/// Identifier of the post commented on.
	#[serde(default)]
	pub post: i64,
	/// Parent comment identifier, `0` for top-level comments.
	#[serde(default)]
	pub parent: i64,
	/// Author identifier, `0` for anonymous commenters.
	#[serde(default)]
	pub author: i64,
	/// Author display name.
	#[serde(default)]
	pub author_name: String,
	/// Author URL.
	#[serde(default)]
	pub author_url: String,
	/// Submission date, RFC 3339.
	#[serde(default)]
	pub date: Option<String>,
	/// Rendered body.
	#[serde(default)]
	pub content: Rendered,
	/// Permalink.
	#[serde(default)]
	pub link: String,
	/// Moderation status, e.g. `approved`.
	#[serde(default)]
	pub status: String,
}

/// Pixel dimensions and location of one generated media size.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MediaSize {
	/// Width in pixels.
	#[serde(default)]
	pub width: u32,
	/// Height in pixels.
	#[serde(default)]
	pub height: u32,
	/// Direct URL of this size.
	#[serde(default)]
	pub source_url: String,
}

/// Size-independent details of an uploaded file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MediaDetails {
	/// Width of the original upload in pixels.
	#[serde(default)]
	pub width: u32,
	/// Height of the original upload in pixels.
	#[serde(default)]
	pub height: u32,
	/// Relative path of the original upload.
	#[serde(default)]
	pub file: String,
	/// Generated sizes keyed by size name, e.g. `thumbnail`.
	#[serde(default)]
	pub sizes: HashMap<String, MediaSize>,
}

/// An uploaded attachment.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Media {
	/// Unique identifier.
	pub id: i64,
	/// Upload date, RFC 3339.
	#[serde(default)]
	pub date: Option<String>,
	/// URL-friendly identifier.
	#[serde(default)]
	pub slug: String,
	/// Rendered title.
	#[serde(default)]
	pub title: Rendered,
	/// Author identifier.
	#[serde(default)]
	pub author: i64,
	/// Rendered caption.
	#[serde(default)]
	pub caption: Rendered,
	/// Alternative text for images.
	#[serde(default)]
	pub alt_text: String,
	/// Broad media class, e.g. `image`.
	#[serde(default)]
	pub media_type: String,
	/// Exact MIME type, e.g. `image/jpeg`.
	#[serde(default)]
	pub mime_type: String,
	/// Dimensions and generated sizes.
	#[serde(default)]
	pub media_details: MediaDetails,
	/// Identifier of the associated post, `0` when detached.
	#[serde(default)]
	pub post: i64,
	/// Direct URL of the original upload.
	#[serde(default)]
	pub source_url: String,
}

/// A flat taxonomy term.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Tag {
	/// Unique identifier.
	pub id: i64,
	/// Number of published posts carrying this term.
	#[serde(default)]
	pub count: i64,
	/// Term description.
	#[serde(default)]
	pub description: String,
	/// Archive permalink.
	#[serde(default)]
	pub link: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// URL-friendly identifier.
	#[serde(default)]
	pub slug: String,
	/// Taxonomy this term belongs to.
	#[serde(default)]
	pub taxonomy: String,
}

/// A hierarchical taxonomy term.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Category {
	/// Unique identifier.
	pub id: i64,
	/// Number of published posts in this category.
	#[serde(default)]
	pub count: i64,
	/// Term description.
	#[serde(default)]
	pub description: String,
	/// Archive permalink.
	#[serde(default)]
	pub link: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// URL-friendly identifier.
	#[serde(default)]
	pub slug: String,
	/// Taxonomy this term belongs to.
	#[serde(default)]
	pub taxonomy: String,
	/// Parent category identifier, `0` for top-level categories.
	#[serde(default)]
	pub parent: i64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn post_tolerates_missing_and_unknown_fields() {
		let post = serde_json::from_str::<Post>(
			r#"{"id":7,"title":{"rendered":"Hello"},"surprise_field":[1,2,3]}"#,
		)
		.expect("Partial post must deserialize.");

		assert_eq!(post.id, 7);
		assert_eq!(post.title.rendered, "Hello");
		assert!(post.date.is_none());
		assert!(post.categories.is_empty());
	}

	#[test]
	fn category_parses_listing_entry() {
		let category = serde_json::from_str::<Category>(
			r#"{"id":3,"count":12,"name":"News","slug":"news","taxonomy":"category","parent":0}"#,
		)
		.expect("Category must deserialize.");

		assert_eq!(category.id, 3);
		assert_eq!(category.count, 12);
		assert_eq!(category.slug, "news");
	}

	#[test]
	fn media_sizes_are_keyed_by_name() {
		let media = serde_json::from_str::<Media>(
			r#"{"id":9,"media_details":{"width":800,"height":600,"file":"a.jpg","sizes":{"thumbnail":{"width":150,"height":150,"source_url":"https://example.test/a-150.jpg"}}}}"#,
		)
		.expect("Media must deserialize.");

		assert_eq!(media.media_details.sizes["thumbnail"].width, 150);
	}
}
