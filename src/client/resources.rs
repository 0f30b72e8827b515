//! Typed operations over the standard resource collections.
//!
//! Every operation seeds a [`RequestBuilder`] with the client's resource root and the target
//! endpoint, hands it to the caller's closure for refinement, and executes the resulting
//! descriptor. A closure returning `None` surfaces as [`BuildError::NoDescriptor`].

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::Client,
	envelope::Envelope,
	error::BuildError,
	model::{Category, Comment, Media, Post, Tag, User},
	request::{Method, RequestBuilder, RequestDescriptor},
};

/// Closure refining a seeded [`RequestBuilder`] into an executable descriptor.
pub trait Refine: FnOnce(RequestBuilder) -> Option<RequestDescriptor> {}
impl<F> Refine for F where F: FnOnce(RequestBuilder) -> Option<RequestDescriptor> {}

impl Client {
	/// Seeds a builder for an arbitrary endpoint beneath the resource root.
	pub fn request(&self, endpoint: impl Into<String>) -> RequestBuilder {
		RequestBuilder::new(self.inner.api_base.as_str(), endpoint)
	}

	/// Lists posts.
	pub async fn posts(&self, refine: impl Refine) -> Result<Envelope<Vec<Post>>> {
		self.fetch("posts", refine).await
	}

	/// Retrieves one post by identifier.
	pub async fn post(&self, id: i64, refine: impl Refine) -> Result<Envelope<Post>> {
		self.fetch(format!("posts/{id}"), refine).await
	}

	/// Creates a post; pair with [`RequestBuilder::with_post_body`].
	pub async fn create_post(&self, refine: impl Refine) -> Result<Envelope<Post>> {
		self.create("posts", refine).await
	}

	/// Lists users.
	pub async fn users(&self, refine: impl Refine) -> Result<Envelope<Vec<User>>> {
		self.fetch("users", refine).await
	}

	/// Retrieves one user by identifier.
	pub async fn user(&self, id: i64, refine: impl Refine) -> Result<Envelope<User>> {
		self.fetch(format!("users/{id}"), refine).await
	}

	/// Retrieves the user the attached authorization resolves to.
	pub async fn current_user(&self, refine: impl Refine) -> Result<Envelope<User>> {
		self.fetch("users/me", refine).await
	}

	/// Creates a user; pair with [`RequestBuilder::with_user_body`].
	pub async fn create_user(&self, refine: impl Refine) -> Result<Envelope<User>> {
		self.create("users", refine).await
	}

	/// Lists comments.
	pub async fn comments(&self, refine: impl Refine) -> Result<Envelope<Vec<Comment>>> {
		self.fetch("comments", refine).await
	}

	/// Retrieves one comment by identifier.
	pub async fn comment(&self, id: i64, refine: impl Refine) -> Result<Envelope<Comment>> {
		self.fetch(format!("comments/{id}"), refine).await
	}

	/// Creates a comment; pair with [`RequestBuilder::with_comment_body`].
	pub async fn create_comment(&self, refine: impl Refine) -> Result<Envelope<Comment>> {
		self.create("comments", refine).await
	}

	/// Lists media items.
	pub async fn media_items(&self, refine: impl Refine) -> Result<Envelope<Vec<Media>>> {
		self.fetch("media", refine).await
	}

	/// Retrieves one media item by identifier.
	pub async fn media_item(&self, id: i64, refine: impl Refine) -> Result<Envelope<Media>> {
		self.fetch(format!("media/{id}"), refine).await
	}

	/// Uploads a media item; pair with [`RequestBuilder::with_media_body`].
	pub async fn create_media(&self, refine: impl Refine) -> Result<Envelope<Media>> {
		self.create("media", refine).await
	}

	/// Lists tags.
	pub async fn tags(&self, refine: impl Refine) -> Result<Envelope<Vec<Tag>>> {
		self.fetch("tags", refine).await
	}

	/// Retrieves one tag by identifier.
	pub async fn tag(&self, id: i64, refine: impl Refine) -> Result<Envelope<Tag>> {
		self.fetch(format!("tags/{id}"), refine).await
	}

	/// Creates a tag; pair with [`RequestBuilder::with_tag_body`].
	pub async fn create_tag(&self, refine: impl Refine) -> Result<Envelope<Tag>> {
		self.create("tags", refine).await
	}

	/// Lists categories.
	pub async fn categories(&self, refine: impl Refine) -> Result<Envelope<Vec<Category>>> {
		self.fetch("categories", refine).await
	}

	/// Retrieves one category by identifier.
	pub async fn category(&self, id: i64, refine: impl Refine) -> Result<Envelope<Category>> {
		self.fetch(format!("categories/{id}"), refine).await
	}

	/// Creates a category; pair with [`RequestBuilder::with_category_body`].
	pub async fn create_category(&self, refine: impl Refine) -> Result<Envelope<Category>> {
		self.create("categories", refine).await
	}

	async fn fetch<T>(&self, endpoint: impl Into<String>, refine: impl Refine) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		let descriptor = refine(self.request(endpoint)).ok_or(BuildError::NoDescriptor)?;

		self.execute(descriptor).await
	}

	async fn create<T>(
		&self,
		endpoint: impl Into<String>,
		refine: impl Refine,
	) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		let descriptor = refine(self.request(endpoint).with_method(Method::Post))
			.ok_or(BuildError::NoDescriptor)?;

		self.execute(descriptor).await
	}
}
