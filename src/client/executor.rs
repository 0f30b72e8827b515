//! The linear per-request execution pipeline.
//!
//! Each request passes through admission, method dispatch, authorization, transport, and
//! classification exactly once; there are no retries. Every recoverable failure ends up inside
//! the returned [`Envelope`], only [`Error::UnsupportedMethod`] is raised to the caller.

// std
use std::time::Instant;
// crates.io
use reqwest::{
	RequestBuilder as HttpRequestBuilder, Response,
	header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::Client,
	envelope::Envelope,
	error::{RequestFailure, ValidationScope},
	obs::{self, RequestOutcome},
	request::{Method, RequestBody, RequestDescriptor},
};

// Bodies shorter than this are treated as empty responses and fail classification.
const MIN_BODY_LEN: usize = 5;

impl Client {
	/// Executes a descriptor and returns the response envelope.
	///
	/// `PUT` and `DELETE` descriptors are rejected with [`Error::UnsupportedMethod`] before any
	/// network traffic; every other failure mode is captured inside the envelope.
	pub async fn execute<T>(&self, descriptor: RequestDescriptor) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		let method = descriptor.method();

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		if matches!(method, Method::Put | Method::Delete) {
			obs::record_request_outcome(method, RequestOutcome::Failure);

			return Err(Error::UnsupportedMethod { method });
		}

		let span = obs::RequestSpan::new(descriptor.endpoint(), method, "execute");
		let envelope = span.instrument(self.dispatch(descriptor)).await;
		let outcome = if envelope.is_success() {
			RequestOutcome::Success
		} else {
			RequestOutcome::Failure
		};

		obs::record_request_outcome(method, outcome);

		Ok(envelope)
	}

	async fn dispatch<T>(&self, descriptor: RequestDescriptor) -> Envelope<T>
	where
		T: DeserializeOwned,
	{
		// Holding the permit across the whole transport exchange bounds in-flight requests;
		// dropping it on any exit path releases the slot.
		let _permit = match self.inner.gate.as_ref() {
			Some(gate) => Some(gate.acquire().await),
			None => None,
		};
		let mut envelope = Envelope::new();
		let started = Instant::now();
		let auth_header = match self.resolve_authorization(&descriptor).await {
			Ok(header) => header,
			Err(failure) => {
				envelope.record_transport(started.elapsed(), None);
				descriptor.notify_failure(&failure);
				descriptor.notify_status(false, failure.to_string());
				envelope.push_message(failure.to_string());
				envelope.set_failure(failure);

				return envelope;
			},
		};
		let request = self.assemble(&descriptor, auth_header);

		match request.send().await {
			Ok(response) => self.classify(&descriptor, started, response, envelope).await,
			Err(e) => {
				envelope.record_transport(started.elapsed(), None);

				let failure = if e.is_timeout() {
					RequestFailure::Timeout { source: e }
				} else {
					RequestFailure::Transport { source: e }
				};

				descriptor.notify_failure(&failure);
				descriptor.notify_status(false, failure.to_string());
				envelope.push_message(failure.to_string());
				envelope.set_failure(failure);

				envelope
			},
		}
	}

	/// Resolves the descriptor's authorization context into a header value.
	///
	/// Returns `Ok(None)` when the descriptor carries no active context; an unresolvable
	/// context short-circuits the pipeline before the resource endpoint is contacted.
	async fn resolve_authorization(
		&self,
		descriptor: &RequestDescriptor,
	) -> Result<Option<String>, RequestFailure> {
		if !descriptor.should_authorize() {
			return Ok(None);
		}

		let Some(auth) = descriptor.authorization.as_ref() else {
			return Ok(None);
		};

		match auth.header_value(&self.inner.http, &self.inner.base_url).await {
			Some(header) => Ok(Some(header)),
			None => Err(RequestFailure::Authorization),
		}
	}

	fn assemble(
		&self,
		descriptor: &RequestDescriptor,
		auth_header: Option<String>,
	) -> HttpRequestBuilder {
		let url = descriptor.url().clone();
		let mut request = match descriptor.method() {
			Method::Post => self.inner.http.post(url),
			_ => self.inner.http.get(url),
		};

		request = request.timeout(descriptor.deadline.unwrap_or(self.inner.timeout));

		for (name, value) in &descriptor.headers {
			request = request.header(name.as_str(), value.as_str());
		}
		if let Some(header) = auth_header {
			request = request.header(AUTHORIZATION, header);
		}
		match descriptor.body.clone() {
			None => {},
			Some(RequestBody::Form(pairs)) => request = request.form(&pairs),
			Some(RequestBody::Json(json)) =>
				request = request.header(CONTENT_TYPE, "application/json").body(json),
			Some(RequestBody::Bytes { content_type, file_name, content, attributes }) => {
				request = request
					.header(CONTENT_TYPE, content_type)
					.header(CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\""))
					.body(content);

				for (name, value) in attributes {
					request = request.header(name, value);
				}
			},
		}

		request
	}

	async fn classify<T>(
		&self,
		descriptor: &RequestDescriptor,
		started: Instant,
		response: Response,
		mut envelope: Envelope<T>,
	) -> Envelope<T>
	where
		T: DeserializeOwned,
	{
		let status = response.status();
		let headers = response.headers().clone();
		let body = match response.text().await {
			Ok(body) => body,
			Err(e) => {
				envelope.record_transport(started.elapsed(), None);

				let failure = if e.is_timeout() {
					RequestFailure::Timeout { source: e }
				} else {
					RequestFailure::Transport { source: e }
				};

				descriptor.notify_failure(&failure);
				descriptor.notify_status(false, failure.to_string());
				envelope.push_message(failure.to_string());
				envelope.set_failure(failure);

				return envelope;
			},
		};

		envelope.record_transport(started.elapsed(), Some((status, &headers)));

		let code = status.as_u16();

		if !status.is_success() || body.len() < MIN_BODY_LEN {
			let message = format!("Request failed with ({code}) status.");
			let failure = RequestFailure::Status { status: code };

			envelope.mark_failed();
			descriptor.notify_failure(&failure);
			descriptor.notify_status(false, message.clone());
			envelope.push_message(message);
			envelope.push_message(body);
			envelope.set_failure(failure);

			return envelope;
		}

		self.inner.stats.record(descriptor.endpoint());

		if let Some(preprocessor) = self.inner.preprocessor.as_ref()
			&& !preprocessor(&body)
		{
			return reject(descriptor, envelope, ValidationScope::Global, code, body);
		}

		descriptor.notify_response(&body);

		if let Some(validator) = descriptor.validator.as_ref()
			&& !validator(&body)
		{
			return reject(descriptor, envelope, ValidationScope::Local, code, body);
		}

		let mut deserializer = serde_json::Deserializer::from_str(&body);

		match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
			Ok(value) => {
				let message = format!("Request success with ({code}) status.");

				envelope.set_value(value);
				descriptor.notify_status(true, message.clone());
				envelope.push_message(message);

				envelope
			},
			Err(e) => {
				let failure = RequestFailure::Deserialize { source: e };

				envelope.mark_failed();
				descriptor.notify_failure(&failure);
				descriptor.notify_status(false, failure.to_string());
				envelope.push_message(failure.to_string());
				envelope.set_failure(failure);

				envelope
			},
		}
	}
}

fn reject<T>(
	descriptor: &RequestDescriptor,
	mut envelope: Envelope<T>,
	scope: ValidationScope,
	code: u16,
	body: String,
) -> Envelope<T> {
	let message = format!("Request aborted with ({code}) [{scope} validation restricted] status.");
	let failure = RequestFailure::Validation { scope };

	envelope.mark_failed();
	descriptor.notify_failure(&failure);
	descriptor.notify_status(false, message.clone());
	envelope.push_message(message);
	envelope.push_message(body);
	envelope.set_failure(failure);

	envelope
}
