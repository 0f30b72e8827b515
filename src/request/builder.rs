//! Fluent assembler turning configuration calls into an immutable [`RequestDescriptor`].

// std
use std::fmt::Write;
// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	auth::Authorization,
	request::{
		BodyError, Callback, CategoryBuilder, CommentBuilder, MediaBuilder, Method, PostBuilder,
		RequestBody, RequestDescriptor, ResponseValidator, TagBuilder, UserBuilder,
	},
};

/// Rendering context requested from the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
	/// Public read view.
	View,
	/// Embeddable representation.
	Embed,
	/// Editable representation (requires authorization).
	Edit,
}
impl Scope {
	const fn as_str(self) -> &'static str {
		match self {
			Scope::View => "view",
			Scope::Embed => "embed",
			Scope::Edit => "edit",
		}
	}
}

/// Relation applied when multiple taxonomy filters are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaxonomyRelation {
	/// Results must match every taxonomy filter.
	And,
	/// Results may match any taxonomy filter.
	Or,
}
impl TaxonomyRelation {
	const fn as_str(self) -> &'static str {
		match self {
			TaxonomyRelation::And => "AND",
			TaxonomyRelation::Or => "OR",
		}
	}
}

/// Publication status filter for list requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentStatus {
	/// Published content only.
	Published,
	/// Draft content only.
	Draft,
	/// Trashed content only.
	Trash,
}
impl ContentStatus {
	const fn as_str(self) -> &'static str {
		match self {
			ContentStatus::Published => "published",
			ContentStatus::Draft => "draft",
			ContentStatus::Trash => "trash",
		}
	}
}

/// Sort direction for list requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
	/// Smallest first.
	Ascending,
	/// Largest first.
	Descending,
}
impl SortDirection {
	const fn as_str(self) -> &'static str {
		match self {
			SortDirection::Ascending => "asc",
			SortDirection::Descending => "desc",
		}
	}
}

/// Sort fields accepted by the collection endpoints.
///
/// `Email`, `Name`, and `Url` are only meaningful for the `users` collection; see
/// [`RequestBuilder::order_result_by`] for the endpoint-sensitive mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
	/// Publication date; `registered_date` on the `users` collection.
	Date,
	/// Author identifier.
	Author,
	/// Item identifier.
	Id,
	/// Position within an explicit include list.
	Include,
	/// Last-modified date.
	Modified,
	/// Parent identifier.
	Parent,
	/// Search relevance.
	Relevance,
	/// Item slug.
	Slug,
	/// Position within an explicit slug include list.
	IncludeSlugs,
	/// Item title.
	Title,
	/// User email address (`users` only).
	Email,
	/// User display name (`users` only).
	Name,
	/// User URL (`users` only).
	Url,
}
impl SortField {
	const fn as_str(self) -> &'static str {
		match self {
			SortField::Date => "date",
			SortField::Author => "author",
			SortField::Id => "id",
			SortField::Include => "include",
			SortField::Modified => "modified",
			SortField::Parent => "parent",
			SortField::Relevance => "relevance",
			SortField::Slug => "slug",
			SortField::IncludeSlugs => "include_slugs",
			SortField::Title => "title",
			SortField::Email => "email",
			SortField::Name => "name",
			SortField::Url => "url",
		}
	}
}

/// Consuming fluent builder for [`RequestDescriptor`] values.
///
/// Every setter takes and returns the builder by value, so a builder is confined to one
/// construction scope and never shared across threads. Only non-default values are emitted
/// into the query string; a fresh builder produces an empty query.
#[derive(Clone, Default)]
pub struct RequestBuilder {
	base: String,
	endpoint: String,
	context: Option<Scope>,
	page: Option<u32>,
	per_page: Option<u32>,
	search: Option<String>,
	embedded: bool,
	after: Option<OffsetDateTime>,
	before: Option<OffsetDateTime>,
	allowed_authors: Vec<i64>,
	excluded_authors: Vec<i64>,
	allowed_ids: Vec<i64>,
	excluded_ids: Vec<i64>,
	offset: Option<u32>,
	direction: Option<SortDirection>,
	sort_field: Option<&'static str>,
	slugs: Vec<String>,
	status: Option<ContentStatus>,
	taxonomy_relation: Option<TaxonomyRelation>,
	allowed_categories: Vec<i64>,
	excluded_categories: Vec<i64>,
	allowed_tags: Vec<i64>,
	excluded_tags: Vec<i64>,
	only_sticky: bool,
	method: Option<Method>,
	headers: Vec<(String, String)>,
	body: Option<RequestBody>,
	body_error: Option<BodyError>,
	authorization: Option<Authorization>,
	deadline: Option<Duration>,
	validator: Option<ResponseValidator>,
	callback: Option<Callback>,
}
impl RequestBuilder {
	/// Creates a builder for `endpoint` beneath the raw base URL.
	///
	/// The base is kept unparsed on purpose: a malformed base surfaces at [`build`] time as an
	/// absent descriptor, never as a panic.
	///
	/// [`build`]: RequestBuilder::build
	pub fn new(base: impl Into<String>, endpoint: impl Into<String>) -> Self {
		let endpoint = endpoint.into();
		let mut base = base.into();

		if !base.ends_with('/') {
			base.push('/');
		}

		base.push_str(&endpoint);

		Self { base, endpoint, ..Self::default() }
	}

	/// Sets the rendering context (`context=`).
	pub fn set_scope(mut self, scope: Scope) -> Self {
		self.context = Some(scope);

		self
	}

	/// Sets the page number to request (`page=`); pages start at 1.
	pub fn with_page_number(mut self, page: u32) -> Self {
		if page >= 1 {
			self.page = Some(page);
		}

		self
	}

	/// Sets the maximum number of elements per returned page (`per_page=`).
	pub fn with_per_page(mut self, count: u32) -> Self {
		if count >= 1 {
			self.per_page = Some(count);
		}

		self
	}

	/// Sets a server-side search query (`search=`).
	///
	/// The value is emitted verbatim; reserved URL characters such as `&` or `#` must be
	/// percent-encoded by the caller, or the assembled query will be cut short at that point.
	pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
		self.search = Some(query.into());

		self
	}

	/// Requests embedded linked resources in the response (`_embed=1`).
	pub fn with_embedded(mut self, value: bool) -> Self {
		self.embedded = value;

		self
	}

	/// Limits results to items published after this instant (`after=`, RFC 3339).
	pub fn values_after(mut self, instant: OffsetDateTime) -> Self {
		self.after = Some(instant);

		self
	}

	/// Limits results to items published before this instant (`before=`, RFC 3339).
	pub fn values_before(mut self, instant: OffsetDateTime) -> Self {
		self.before = Some(instant);

		self
	}

	/// Limits results to items published by these authors (`author=`).
	pub fn allow_authors(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
		self.allowed_authors.extend(ids);

		self
	}

	/// Excludes items published by these authors (`author_exclude=`).
	pub fn exclude_authors(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
		self.excluded_authors.extend(ids);

		self
	}

	/// Limits results to these item identifiers (`include=`).
	pub fn include_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
		self.allowed_ids.extend(ids);

		self
	}

	/// Excludes these item identifiers (`exclude=`).
	pub fn exclude_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
		self.excluded_ids.extend(ids);

		self
	}

	/// Skips the first `offset` results (`offset=`).
	pub fn with_result_offset(mut self, offset: u32) -> Self {
		if offset > 0 {
			self.offset = Some(offset);
		}

		self
	}

	/// Sets the sort direction (`order=asc|desc`).
	pub fn order_direction(mut self, direction: SortDirection) -> Self {
		self.direction = Some(direction);

		self
	}

	/// Sets the sort field (`orderby=`), with endpoint-sensitive mapping.
	///
	/// On the `users` collection, [`SortField::Date`] maps to `registered_date`;
	/// [`SortField::Email`], [`SortField::Name`], and [`SortField::Url`] are only accepted
	/// there. Unsupported endpoint+field combinations leave the sort unset.
	pub fn order_result_by(mut self, field: SortField) -> Self {
		let users = self.endpoint_bucket() == "users";

		self.sort_field = match field {
			SortField::Date if users => Some("registered_date"),
			SortField::Email | SortField::Name | SortField::Url if !users => self.sort_field,
			accepted => Some(accepted.as_str()),
		};

		self
	}

	/// Limits results to these slugs (`slug=`).
	pub fn allow_slugs(mut self, slugs: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.slugs.extend(slugs.into_iter().map(Into::into));

		self
	}

	/// Limits results to a publication status (`status=`).
	pub fn set_allowed_status(mut self, status: ContentStatus) -> Self {
		self.status = Some(status);

		self
	}

	/// Sets the relation applied across taxonomy filters (`tax_relation=`).
	pub fn set_allowed_taxonomy_relation(mut self, relation: TaxonomyRelation) -> Self {
		self.taxonomy_relation = Some(relation);

		self
	}

	/// Limits results to these categories (`categories=`).
	///
	/// A set containing the sentinel `-1` means "no category filter" and turns the whole call
	/// into a no-op; the sentinel survives from upstream callers that signal absence this way.
	pub fn allow_categories(mut self, categories: impl IntoIterator<Item = i64>) -> Self {
		let categories = categories.into_iter().collect::<Vec<_>>();

		if categories.contains(&-1) {
			return self;
		}

		self.allowed_categories.extend(categories);

		self
	}

	/// Excludes these categories (`categories_exclude=`).
	pub fn exclude_categories(mut self, categories: impl IntoIterator<Item = i64>) -> Self {
		self.excluded_categories.extend(categories);

		self
	}

	/// Limits results to these tags (`tags=`).
	pub fn allow_tags(mut self, tags: impl IntoIterator<Item = i64>) -> Self {
		self.allowed_tags.extend(tags);

		self
	}

	/// Excludes these tags (`tags_exclude=`).
	pub fn exclude_tags(mut self, tags: impl IntoIterator<Item = i64>) -> Self {
		self.excluded_tags.extend(tags);

		self
	}

	/// Limits results to sticky items only (`sticky=1`).
	pub fn limit_to_sticky(mut self, should_limit: bool) -> Self {
		self.only_sticky = should_limit;

		self
	}

	/// Attaches an authorization context; inactive contexts are ignored.
	pub fn with_authorization(mut self, auth: Authorization) -> Self {
		if !auth.should_authorize() {
			return self;
		}

		self.authorization = Some(auth);

		self
	}

	/// Adds additional headers to the request.
	pub fn with_headers(
		mut self,
		headers: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
	) -> Self {
		self.headers.extend(headers.into_iter().map(|(key, value)| (key.into(), value.into())));

		self
	}

	/// Supplies a per-request cancellation deadline, overriding the client-wide timeout.
	pub fn with_deadline(mut self, deadline: Duration) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Adds a per-request response validation predicate.
	///
	/// The raw response text is supplied to the predicate after global preprocessing; `false`
	/// terminates the request with a failure envelope.
	pub fn with_response_validation_override(
		mut self,
		validator: impl Fn(&str) -> bool + Send + Sync + 'static,
	) -> Self {
		self.validator = Some(Arc::new(validator));

		self
	}

	/// Attaches a callback bundle fired at fixed pipeline points.
	pub fn with_callback(mut self, callback: Callback) -> Self {
		self.callback = Some(callback);

		self
	}

	/// Transforms the request to carry a post body (used for create-post requests).
	pub fn with_post_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(PostBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(PostBuilder::default()))
	}

	/// Transforms the request to carry a media body (used for create-media requests).
	pub fn with_media_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(MediaBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(MediaBuilder::default()))
	}

	/// Transforms the request to carry a tag body (used for create-tag requests).
	pub fn with_tag_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(TagBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(TagBuilder::default()))
	}

	/// Transforms the request to carry a comment body (used for create-comment requests).
	pub fn with_comment_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(CommentBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(CommentBuilder::default()))
	}

	/// Transforms the request to carry a user body (used for create-user requests).
	pub fn with_user_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(UserBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(UserBuilder::default()))
	}

	/// Transforms the request to carry a category body (used for create-category requests).
	pub fn with_category_body<F>(self, builder: F) -> Self
	where
		F: FnOnce(CategoryBuilder) -> Result<RequestBody, BodyError>,
	{
		self.apply_body(builder(CategoryBuilder::default()))
	}

	/// Attaches an already-constructed body.
	pub fn with_body(self, body: RequestBody) -> Self {
		self.apply_body(Ok(body))
	}

	/// Overrides the HTTP verb; descriptors default to [`Method::Get`].
	///
	/// The executor only dispatches `GET` and `POST`; a `PUT` or `DELETE` descriptor is rejected
	/// with an unsupported-method error before any I/O.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);

		self
	}

	/// Consumes the builder and produces a descriptor.
	///
	/// Returns `None` when the assembled URL fails parsing or a body sub-builder reported a
	/// construction error; building never panics.
	pub fn build(self) -> Option<RequestDescriptor> {
		if self.body_error.is_some() {
			return None;
		}

		let url = Url::parse(&self.assemble_target()).ok()?;

		Some(RequestDescriptor {
			url,
			method: self.method.unwrap_or(Method::Get),
			endpoint: self.endpoint,
			headers: self.headers,
			body: self.body,
			authorization: self.authorization,
			deadline: self.deadline,
			validator: self.validator,
			callback: self.callback,
		})
	}

	fn apply_body(mut self, body: Result<RequestBody, BodyError>) -> Self {
		match body {
			Ok(body) => self.body = Some(body),
			Err(e) => self.body_error = Some(e),
		}

		self
	}

	fn endpoint_bucket(&self) -> &str {
		self.endpoint.split('/').next().unwrap_or(&self.endpoint)
	}

	// Parameters are appended in a fixed, deterministic order; only configured values emit.
	fn assemble_target(&self) -> String {
		let mut query = QueryString::new(self.base.clone());

		if let Some(context) = self.context {
			query.append("context", context.as_str());
		}
		if let Some(page) = self.page {
			query.append("page", page);
		}
		if let Some(per_page) = self.per_page {
			query.append("per_page", per_page);
		}
		if let Some(search) = self.search.as_deref() {
			query.append("search", search);
		}
		if self.embedded {
			query.append("_embed", 1);
		}
		if let Some(formatted) = self.after.and_then(|instant| instant.format(&Rfc3339).ok()) {
			query.append("after", formatted);
		}
		if let Some(formatted) = self.before.and_then(|instant| instant.format(&Rfc3339).ok()) {
			query.append("before", formatted);
		}

		query.append_ids("author", &self.allowed_authors);
		query.append_ids("author_exclude", &self.excluded_authors);
		query.append_ids("include", &self.allowed_ids);
		query.append_ids("exclude", &self.excluded_ids);

		if let Some(offset) = self.offset {
			query.append("offset", offset);
		}
		if let Some(direction) = self.direction {
			query.append("order", direction.as_str());
		}
		if let Some(field) = self.sort_field {
			query.append("orderby", field);
		}
		if !self.slugs.is_empty() {
			query.append("slug", self.slugs.join(","));
		}
		if let Some(status) = self.status {
			query.append("status", status.as_str());
		}
		if let Some(relation) = self.taxonomy_relation {
			query.append("tax_relation", relation.as_str());
		}

		query.append_ids("categories", &self.allowed_categories);
		query.append_ids("categories_exclude", &self.excluded_categories);
		query.append_ids("tags", &self.allowed_tags);
		query.append_ids("tags_exclude", &self.excluded_tags);

		if self.only_sticky {
			query.append("sticky", 1);
		}

		query.finish()
	}
}

impl Debug for RequestBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBuilder")
			.field("base", &self.base)
			.field("endpoint", &self.endpoint)
			.field("method", &self.method)
			.field("body_set", &self.body.is_some())
			.field("authorization_set", &self.authorization.is_some())
			.field("validator_set", &self.validator.is_some())
			.field("callback_set", &self.callback.is_some())
			.finish()
	}
}

/// Appends `key=value` pairs, joining the first with `?` and the rest with `&`.
struct QueryString {
	buf: String,
	first: bool,
}
impl QueryString {
	fn new(base: String) -> Self {
		let first = !base.contains('?');

		Self { buf: base, first }
	}

	fn append(&mut self, key: &str, value: impl Display) {
		let joiner = if self.first { '?' } else { '&' };

		self.first = false;

		// Writing into a String cannot fail.
		let _ = write!(self.buf, "{joiner}{key}={value}");
	}

	fn append_ids(&mut self, key: &str, ids: &[i64]) {
		if ids.is_empty() {
			return;
		}

		let joined =
			ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");

		self.append(key, joined);
	}

	fn finish(self) -> String {
		self.buf
	}
}
