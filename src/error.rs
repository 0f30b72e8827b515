//! Client-level error types shared across builders, authorization, and the executor.

// self
use crate::{_prelude::*, request::Method};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Hard faults exposed by public APIs.
///
/// Everything recoverable (transport failures, rejected validations, timeouts) is carried
/// inside an [`Envelope`](crate::envelope::Envelope) as a [`RequestFailure`] instead; callers
/// branch on the envelope's success flag, never on raised errors, for ordinary failure
/// handling.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request construction failure.
	#[error(transparent)]
	Build(#[from] BuildError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Verb is not implemented by the executor; checked before any I/O begins.
	#[error("The {method} method is not implemented by this client.")]
	UnsupportedMethod {
		/// Verb the caller attempted to dispatch.
		method: Method,
	},
}

/// Failures raised while assembling a request descriptor.
#[derive(Debug, ThisError)]
pub enum BuildError {
	/// The builder closure returned no executable descriptor (malformed URL or body).
	#[error("Request builder did not produce an executable descriptor.")]
	NoDescriptor,
	/// A typed body sub-builder rejected its inputs.
	#[error(transparent)]
	Body(#[from] crate::request::BodyError),
}

/// Configuration and validation failures raised while constructing a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: ReqwestError,
	},
	/// Credentials were supplied with an empty username or password.
	#[error("Credentials require a non-empty username and password.")]
	EmptyCredentials,
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::HttpClientBuild { source: e }
	}
}

/// Recoverable per-request failures captured inside response envelopes.
///
/// The executor converts every one of these into a failure envelope; none of them propagate
/// to the caller as a raised fault.
#[derive(Debug, ThisError)]
pub enum RequestFailure {
	/// The governing cancellation deadline elapsed before a response arrived.
	#[error("Request timed out before a response arrived.")]
	Timeout {
		/// Transport-level timeout error.
		#[source]
		source: ReqwestError,
	},
	/// Network failure (DNS, TCP, TLS) while calling the endpoint.
	#[error("Network error occurred while calling the endpoint.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: ReqwestError,
	},
	/// Credential rejected, or token issuance/validation failed.
	#[error("Authorization failed.")]
	Authorization,
	/// Endpoint answered with a non-success status or an empty body.
	#[error("Endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code of the rejected response.
		status: u16,
	},
	/// A response validation predicate rejected the body.
	#[error("{scope} validation rejected the response body.")]
	Validation {
		/// Which predicate rejected the body.
		scope: ValidationScope,
	},
	/// Endpoint returned a body that could not be deserialized.
	#[error("Endpoint returned malformed JSON.")]
	Deserialize {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Origin of a validation rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationScope {
	/// The client-wide response preprocessor.
	Global,
	/// The descriptor's per-request validator.
	Local,
}
impl ValidationScope {
	/// Returns the label embedded in failure envelope messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			ValidationScope::Global => "Globally defined",
			ValidationScope::Local => "User defined",
		}
	}
}
impl Display for ValidationScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
