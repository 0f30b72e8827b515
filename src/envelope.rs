//! Uniform success/failure container returned to callers instead of raised faults.

// crates.io
use reqwest::{StatusCode, header::HeaderMap};
// self
use crate::{_prelude::*, error::RequestFailure};

// Status code recorded when no transport response was obtained at all, e.g. an
// authorization failure that short-circuited before the network send.
const NO_RESPONSE_STATUS: u16 = StatusCode::FORBIDDEN.as_u16();

/// Envelope wrapping one request's outcome: value, status, headers, timing, and message trail.
///
/// Envelopes are write-once from the executor's point of view; every setter is crate-private
/// and runs inside the execution path, callers only read.
#[derive(Debug, Default)]
pub struct Envelope<T> {
	value: Option<T>,
	headers: HashMap<String, String>,
	success: bool,
	status_code: u16,
	duration: Duration,
	failure: Option<RequestFailure>,
	messages: Vec<String>,
}
impl<T> Envelope<T> {
	pub(crate) fn new() -> Self {
		Self {
			value: None,
			headers: HashMap::new(),
			success: false,
			status_code: 0,
			duration: Duration::ZERO,
			failure: None,
			messages: Vec::new(),
		}
	}

	/// Deserialized value; absent on failure.
	pub fn value(&self) -> Option<&T> {
		self.value.as_ref()
	}

	/// Consumes the envelope and returns the deserialized value, if any.
	pub fn into_value(self) -> Option<T> {
		self.value
	}

	/// Response headers flattened to a name→joined-value mapping.
	pub fn headers(&self) -> &HashMap<String, String> {
		&self.headers
	}

	/// Whether the request completed successfully end to end.
	pub fn is_success(&self) -> bool {
		self.success
	}

	/// HTTP status code; a conventional `403` placeholder when no response was obtained.
	pub fn status_code(&self) -> u16 {
		self.status_code
	}

	/// Elapsed time between dispatch and response.
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Failure captured during execution, if any.
	pub fn failure(&self) -> Option<&RequestFailure> {
		self.failure.as_ref()
	}

	/// Human-readable message trail accumulated by the executor.
	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	/// Message trail joined into a single newline-separated string.
	pub fn message(&self) -> String {
		self.messages.join("\n")
	}

	pub(crate) fn set_value(&mut self, value: T) {
		self.value = Some(value);
	}

	pub(crate) fn set_failure(&mut self, failure: RequestFailure) {
		self.failure = Some(failure);
	}

	pub(crate) fn push_message(&mut self, message: impl Into<String>) {
		self.messages.push(message.into());
	}

	/// Populates status, status code, and headers from the raw transport response.
	///
	/// A `None` response means no network response was obtained (e.g. authorization failed
	/// before the send); the envelope is marked failed with the `403` placeholder.
	pub(crate) fn record_transport(
		&mut self,
		elapsed: Duration,
		response: Option<(StatusCode, &HeaderMap)>,
	) {
		self.duration = elapsed;

		match response {
			Some((status, headers)) => {
				self.success = status.is_success();
				self.status_code = status.as_u16();
				self.headers = flatten_headers(headers);
			},
			None => {
				self.success = false;
				self.status_code = NO_RESPONSE_STATUS;
			},
		}
	}

	pub(crate) fn mark_failed(&mut self) {
		self.success = false;
	}
}

/// Flattens a header map into a name→value mapping, joining multi-value headers with commas.
fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
	let mut collection = HashMap::new();

	for name in headers.keys() {
		let joined = headers
			.get_all(name)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.collect::<Vec<_>>()
			.join(",");

		collection.insert(name.as_str().to_owned(), joined);
	}

	collection
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::header::{HeaderMap, HeaderValue};
	// self
	use super::*;

	#[test]
	fn missing_response_marks_forbidden_placeholder() {
		let mut envelope = Envelope::<()>::new();

		envelope.record_transport(Duration::from_millis(3), None);

		assert!(!envelope.is_success());
		assert_eq!(envelope.status_code(), 403);
		assert!(envelope.headers().is_empty());
	}

	#[test]
	fn multi_value_headers_join_with_commas() {
		let mut headers = HeaderMap::new();

		headers.append("x-cache", HeaderValue::from_static("miss"));
		headers.append("x-cache", HeaderValue::from_static("hit"));
		headers.insert("x-total", HeaderValue::from_static("42"));

		let mut envelope = Envelope::<()>::new();

		envelope.record_transport(Duration::from_millis(1), Some((StatusCode::OK, &headers)));

		assert!(envelope.is_success());
		assert_eq!(envelope.status_code(), 200);
		assert_eq!(envelope.headers().get("x-cache").map(String::as_str), Some("miss,hit"));
		assert_eq!(envelope.headers().get("x-total").map(String::as_str), Some("42"));
	}

	#[test]
	fn message_trail_joins_lines() {
		let mut envelope = Envelope::<u8>::new();

		envelope.push_message("Request failed with (404) status.");
		envelope.push_message("not found");

		assert_eq!(envelope.message(), "Request failed with (404) status.\nnot found");
	}
}
