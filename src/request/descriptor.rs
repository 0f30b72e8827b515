//! Immutable request descriptors and the callback bundle they carry.

// self
use crate::{_prelude::*, auth::Authorization, error::RequestFailure, request::RequestBody};

/// HTTP verbs understood by the descriptor layer.
///
/// Only `Get` and `Post` are dispatchable; the executor rejects `Put` and `Delete` with an
/// explicit unsupported-operation error before any I/O begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Retrieve a collection or item.
	Get,
	/// Create an item.
	Post,
	/// Update an item (not implemented).
	Put,
	/// Remove an item (not implemented).
	Delete,
}
impl Method {
	/// Returns the verb's wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Predicate applied to the raw response text before deserialization.
pub type ResponseValidator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Terminal status of one request, forwarded to the status callback.
#[derive(Clone, Debug)]
pub struct RequestStatus {
	/// Whether the request completed successfully.
	pub ok: bool,
	/// Human-readable summary of the terminal condition.
	pub message: String,
}

/// Observability hooks fired at fixed points of the execution pipeline.
///
/// None of the hooks affect control flow; they observe failures, raw response bodies, and the
/// terminal request status.
#[derive(Clone, Default)]
pub struct Callback {
	pub(crate) on_failure: Option<Arc<dyn Fn(&RequestFailure) + Send + Sync>>,
	pub(crate) on_response: Option<Arc<dyn Fn(&str) + Send + Sync>>,
	pub(crate) on_status: Option<Arc<dyn Fn(&RequestStatus) + Send + Sync>>,
}
impl Callback {
	/// Creates an empty callback bundle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a handler for failures captured by the executor.
	pub fn on_failure(mut self, handler: impl Fn(&RequestFailure) + Send + Sync + 'static) -> Self {
		self.on_failure = Some(Arc::new(handler));

		self
	}

	/// Registers a handler receiving every raw response body that passes classification.
	pub fn on_response(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
		self.on_response = Some(Arc::new(handler));

		self
	}

	/// Registers a handler receiving the terminal [`RequestStatus`].
	pub fn on_status(mut self, handler: impl Fn(&RequestStatus) + Send + Sync + 'static) -> Self {
		self.on_status = Some(Arc::new(handler));

		self
	}

	pub(crate) fn notify_failure(&self, failure: &RequestFailure) {
		if let Some(handler) = self.on_failure.as_ref() {
			handler(failure);
		}
	}

	pub(crate) fn notify_response(&self, body: &str) {
		if let Some(handler) = self.on_response.as_ref() {
			handler(body);
		}
	}

	pub(crate) fn notify_status(&self, status: RequestStatus) {
		if let Some(handler) = self.on_status.as_ref() {
			handler(&status);
		}
	}
}
impl Debug for Callback {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Callback")
			.field("on_failure_set", &self.on_failure.is_some())
			.field("on_response_set", &self.on_response.is_some())
			.field("on_status_set", &self.on_status.is_some())
			.finish()
	}
}

/// Fully assembled, immutable description of one HTTP call.
///
/// Descriptors only exist with a successfully constructed target URL; query-string assembly
/// failures yield no descriptor at all.
#[derive(Clone)]
pub struct RequestDescriptor {
	pub(crate) url: Url,
	pub(crate) method: Method,
	pub(crate) endpoint: String,
	pub(crate) headers: Vec<(String, String)>,
	pub(crate) body: Option<RequestBody>,
	pub(crate) authorization: Option<Authorization>,
	pub(crate) deadline: Option<Duration>,
	pub(crate) validator: Option<ResponseValidator>,
	pub(crate) callback: Option<Callback>,
}
impl RequestDescriptor {
	/// Target URL including the assembled query string.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Verb this descriptor dispatches with.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Logical endpoint label used for routing and call-count bucketing.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Whether an authorization context is attached and active.
	pub fn should_authorize(&self) -> bool {
		self.authorization.as_ref().is_some_and(Authorization::should_authorize)
	}

	/// Whether a per-request validation predicate is attached.
	pub fn should_validate_response(&self) -> bool {
		self.validator.is_some()
	}

	pub(crate) fn notify_failure(&self, failure: &RequestFailure) {
		if let Some(callback) = self.callback.as_ref() {
			callback.notify_failure(failure);
		}
	}

	pub(crate) fn notify_response(&self, body: &str) {
		if let Some(callback) = self.callback.as_ref() {
			callback.notify_response(body);
		}
	}

	pub(crate) fn notify_status(&self, ok: bool, message: impl Into<String>) {
		if let Some(callback) = self.callback.as_ref() {
			callback.notify_status(RequestStatus { ok, message: message.into() });
		}
	}
}
impl Debug for RequestDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDescriptor")
			.field("url", &self.url.as_str())
			.field("method", &self.method)
			.field("endpoint", &self.endpoint)
			.field("should_authorize", &self.should_authorize())
			.finish()
	}
}
