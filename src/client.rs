//! Client construction and per-instance resources.
//!
//! A [`Client`] owns one connection pool, one optional admission semaphore, and one
//! [`EndpointStats`] map. Nothing here is process-global: two clients pointed at the same site
//! keep independent cookie stores, counters, and concurrency budgets.

mod executor;
mod resources;

// crates.io
use reqwest::header::HeaderMap;
// self
use crate::{_prelude::*, error::ConfigError, stats::EndpointStats};

/// Client-wide predicate applied to every raw response body before the per-request validator.
pub type ResponsePreprocessor = Arc<dyn Fn(&str) -> bool + Send + Sync>;

const DEFAULT_API_PATH: &str = "wp/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Asynchronous API client with bounded in-flight concurrency.
///
/// Cloning is cheap and shares the pool, the admission gate, and the statistics map.
#[derive(Clone)]
pub struct Client {
	inner: Arc<Inner>,
}

struct Inner {
	http: ReqwestClient,
	// Site root with a trailing slash; token endpoints are joined against this.
	base_url: Url,
	// Resource root (`base_url` + API path); collection endpoints are joined against this.
	api_base: Url,
	timeout: Duration,
	gate: Option<Semaphore>,
	preprocessor: Option<ResponsePreprocessor>,
	stats: EndpointStats,
}

impl Client {
	/// Starts a [`ClientBuilder`] for the given site root.
	///
	/// The root is the URL prefix the API lives under, e.g. `https://example.test/wp-json`; a
	/// trailing slash is appended when missing so relative endpoint joins behave predictably.
	pub fn builder(base_url: &str) -> Result<ClientBuilder> {
		let normalized = if base_url.ends_with('/') {
			base_url.to_owned()
		} else {
			format!("{base_url}/")
		};
		let base_url = Url::parse(&normalized)
			.map_err(|e| ConfigError::InvalidBaseUrl { source: e })?;

		Ok(ClientBuilder {
			base_url,
			api_path: DEFAULT_API_PATH.into(),
			timeout: DEFAULT_TIMEOUT,
			concurrency_cap: 0,
			default_headers: HeaderMap::new(),
			user_agent: None,
			cookie_store: true,
			preprocessor: None,
			stats: EndpointStats::new(),
		})
	}

	/// Site root this client was configured with.
	pub fn base_url(&self) -> &Url {
		&self.inner.base_url
	}

	/// Resource root all collection endpoints are resolved beneath.
	pub fn api_base(&self) -> &Url {
		&self.inner.api_base
	}

	/// Per-client endpoint call statistics.
	pub fn stats(&self) -> &EndpointStats {
		&self.inner.stats
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.inner.base_url.as_str())
			.field("api_base", &self.inner.api_base.as_str())
			.field("timeout", &self.inner.timeout)
			.field("bounded", &self.inner.gate.is_some())
			.field("preprocessor_set", &self.inner.preprocessor.is_some())
			.finish()
	}
}

/// Configuration surface for [`Client`], consumed by [`build`](ClientBuilder::build).
pub struct ClientBuilder {
	base_url: Url,
	api_path: String,
	timeout: Duration,
	concurrency_cap: usize,
	default_headers: HeaderMap,
	user_agent: Option<String>,
	cookie_store: bool,
	preprocessor: Option<ResponsePreprocessor>,
	stats: EndpointStats,
}
impl ClientBuilder {
	/// Overrides the API path joined onto the site root; defaults to `wp/v2`.
	pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
		self.api_path = path.into();

		self
	}

	/// Sets the default request timeout, used whenever a descriptor carries no deadline.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Caps the number of concurrently executing requests; `0` leaves admission unbounded.
	pub fn with_concurrency_cap(mut self, cap: usize) -> Self {
		self.concurrency_cap = cap;

		self
	}

	/// Sets headers attached to every outbound request.
	pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
		self.default_headers = headers;

		self
	}

	/// Sets the `User-Agent` sent with every outbound request.
	pub fn with_default_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Enables or disables the in-memory cookie store; enabled by default.
	pub fn with_cookie_store(mut self, enabled: bool) -> Self {
		self.cookie_store = enabled;

		self
	}

	/// Installs a client-wide response preprocessor.
	///
	/// The predicate sees every classified response body before deserialization; returning
	/// `false` converts the request into a failure envelope.
	pub fn with_global_response_processor(
		mut self,
		processor: impl Fn(&str) -> bool + Send + Sync + 'static,
	) -> Self {
		self.preprocessor = Some(Arc::new(processor));

		self
	}

	/// Supplies a pre-populated statistics map, e.g. one shared with a metrics exporter.
	pub fn with_endpoint_stats(mut self, stats: EndpointStats) -> Self {
		self.stats = stats;

		self
	}

	/// Registers an observer fired after every recorded endpoint call.
	pub fn with_stats_observer(
		mut self,
		observer: impl Fn(&str, u64) + Send + Sync + 'static,
	) -> Self {
		self.stats = self.stats.with_observer(observer);

		self
	}

	/// Builds the client, constructing the underlying connection pool.
	pub fn build(self) -> Result<Client> {
		let api_path = if self.api_path.ends_with('/') {
			self.api_path
		} else {
			format!("{}/", self.api_path)
		};
		let api_base = self
			.base_url
			.join(&api_path)
			.map_err(|e| ConfigError::InvalidBaseUrl { source: e })?;
		let mut http = ReqwestClient::builder()
			.cookie_store(self.cookie_store)
			.default_headers(self.default_headers);

		if let Some(user_agent) = self.user_agent {
			http = http.user_agent(user_agent);
		}

		let http = http.build().map_err(ConfigError::from)?;

		Ok(Client {
			inner: Arc::new(Inner {
				http,
				base_url: self.base_url,
				api_base,
				timeout: self.timeout,
				gate: (self.concurrency_cap > 0).then(|| Semaphore::new(self.concurrency_cap)),
				preprocessor: self.preprocessor,
				stats: self.stats,
			}),
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_normalizes_trailing_slash_and_api_path() {
		let client = Client::builder("https://example.test/wp-json")
			.expect("Base URL should parse.")
			.build()
			.expect("Client should build.");

		assert_eq!(client.base_url().as_str(), "https://example.test/wp-json/");
		assert_eq!(client.api_base().as_str(), "https://example.test/wp-json/wp/v2/");
	}

	#[test]
	fn custom_api_path_replaces_default() {
		let client = Client::builder("https://example.test/wp-json/")
			.expect("Base URL should parse.")
			.with_api_path("wp/v3")
			.build()
			.expect("Client should build.");

		assert_eq!(client.api_base().as_str(), "https://example.test/wp-json/wp/v3/");
	}

	#[test]
	fn malformed_base_url_is_a_config_error() {
		assert!(matches!(
			Client::builder("not a url"),
			Err(crate::error::Error::Config(ConfigError::InvalidBaseUrl { .. }))
		));
	}

	#[test]
	fn zero_cap_leaves_admission_unbounded() {
		let unbounded = Client::builder("https://example.test/wp-json")
			.expect("Base URL should parse.")
			.build()
			.expect("Client should build.");
		let bounded = Client::builder("https://example.test/wp-json")
			.expect("Base URL should parse.")
			.with_concurrency_cap(2)
			.build()
			.expect("Client should build.");

		assert!(unbounded.inner.gate.is_none());
		assert!(bounded.inner.gate.is_some());
	}
}
