//! Typed body sub-builders for create requests.
//!
//! Each sub-builder is handed to a caller closure as a freshly defaulted instance and produces
//! a [`RequestBody`]; required-field validation surfaces as a [`BodyError`] instead of a panic,
//! which in turn makes the surrounding request build yield no descriptor.

pub mod category;
pub mod comment;
pub mod media;
pub mod post;
pub mod tag;
pub mod user;

pub use category::CategoryBuilder;
pub use comment::CommentBuilder;
pub use media::MediaBuilder;
pub use post::PostBuilder;
pub use tag::TagBuilder;
pub use user::UserBuilder;

// self
use crate::_prelude::*;

/// Errors raised while constructing a typed request body.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum BodyError {
	/// A required field was left unset.
	#[error("The {field} field is required and cannot be empty.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// A slug contained characters outside `a-z A-Z 0-9 - _`.
	#[error("Slug `{slug}` may only contain alphanumeric characters, hyphens, and underscores.")]
	InvalidSlug {
		/// Offending slug value.
		slug: String,
	},
}

/// Opaque payload attached to a POST request.
#[derive(Clone, Debug)]
pub enum RequestBody {
	/// URL-encoded form pairs, emitted in insertion order.
	Form(Vec<(String, String)>),
	/// Raw JSON text with an `application/json` content type.
	Json(String),
	/// Raw bytes for media uploads, plus the attribute headers that ride along.
	Bytes {
		/// Caller-supplied MIME type of the payload.
		content_type: String,
		/// File name advertised in the content-disposition header.
		file_name: String,
		/// Upload payload.
		content: Vec<u8>,
		/// Extra attribute headers attached to the upload request.
		attributes: Vec<(String, String)>,
	},
}

pub(crate) fn validate_slug(slug: &str) -> Result<(), BodyError> {
	if slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
		Ok(())
	} else {
		Err(BodyError::InvalidSlug { slug: slug.to_owned() })
	}
}
