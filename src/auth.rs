//! Authorization contexts for outbound requests.
//!
//! A context is created once per logical login and shared across requests. Basic credentials
//! are encoded eagerly; bearer tokens are resolved lazily on first use behind a per-context
//! async mutex, so concurrent first-use requests piggy-back on a single issuance call instead
//! of racing the cache fill. Token traffic fails closed: a network error, non-success status,
//! or malformed payload surfaces as an authorization failure, never as a raised fault.

pub mod token;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
// self
use crate::{_prelude::*, error::ConfigError};

/// Authentication method tag carried by an [`Authorization`] context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
	/// No authorization; requests are sent without an auth header.
	None,
	/// Basic scheme: `Base64(username:password)`, computed eagerly.
	Basic,
	/// Bearer-token scheme backed by the token issuance/validation endpoints.
	Token,
}
impl Scheme {
	/// Returns the HTTP auth-scheme label, when one applies.
	pub const fn as_str(self) -> Option<&'static str> {
		match self {
			Scheme::None => None,
			Scheme::Basic => Some("Basic"),
			Scheme::Token => Some("Bearer"),
		}
	}
}

/// Credential set resolved into an auth header on demand.
///
/// Cloning is cheap and shares the cached token state, so one login can back many concurrent
/// requests.
#[derive(Clone, Debug)]
pub struct Authorization(Arc<Context>);

#[derive(Debug)]
struct Context {
	scheme: Scheme,
	username: String,
	password: String,
	// Eagerly encoded `username:password` for the basic scheme.
	encoded: Option<String>,
	cache: AsyncMutex<TokenCache>,
}

#[derive(Debug, Default)]
struct TokenCache {
	access_token: Option<String>,
	validated_once: bool,
}

impl Authorization {
	/// Creates an unauthenticated context; no header is ever attached.
	pub fn none() -> Self {
		Self(Arc::new(Context {
			scheme: Scheme::None,
			username: String::new(),
			password: String::new(),
			encoded: None,
			cache: AsyncMutex::new(TokenCache::default()),
		}))
	}

	/// Creates a basic-auth context; the header value is computed here, once.
	pub fn basic(
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let (username, password) = validate(username.into(), password.into())?;
		let encoded = BASE64.encode(format!("{username}:{password}"));

		Ok(Self(Arc::new(Context {
			scheme: Scheme::Basic,
			username,
			password,
			encoded: Some(encoded),
			cache: AsyncMutex::new(TokenCache::default()),
		})))
	}

	/// Creates a token-auth context; the token is fetched lazily on first use.
	pub fn bearer(
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::bearer_inner(username.into(), password.into(), None)
	}

	/// Creates a token-auth context seeded with an already-issued token.
	///
	/// The seeded token is still validated against the validation endpoint on first use.
	pub fn bearer_with_token(
		username: impl Into<String>,
		password: impl Into<String>,
		token: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::bearer_inner(username.into(), password.into(), Some(token.into()))
	}

	fn bearer_inner(
		username: String,
		password: String,
		token: Option<String>,
	) -> Result<Self, ConfigError> {
		let (username, password) = validate(username, password)?;

		Ok(Self(Arc::new(Context {
			scheme: Scheme::Token,
			username,
			password,
			encoded: None,
			cache: AsyncMutex::new(TokenCache { access_token: token, validated_once: false }),
		})))
	}

	/// Scheme tag for this context.
	pub fn scheme(&self) -> Scheme {
		self.0.scheme
	}

	/// Whether requests carrying this context need an auth header at all.
	pub fn should_authorize(&self) -> bool {
		self.0.scheme != Scheme::None
	}

	/// Whether an access token (or eager basic encoding) is currently cached.
	pub async fn is_resolved(&self) -> bool {
		match self.0.scheme {
			Scheme::None => false,
			Scheme::Basic => true,
			Scheme::Token => self.0.cache.lock().await.access_token.is_some(),
		}
	}

	/// Resolves this context into a full `Authorization` header value.
	///
	/// For the token scheme this may perform up to two network calls against `base_url`: a
	/// validation of the cached token, then an issuance with the stored credentials when no
	/// valid token exists. A previously validated token short-circuits both.
	pub(crate) async fn header_value(&self, http: &ReqwestClient, base_url: &Url) -> Option<String> {
		match self.0.scheme {
			Scheme::None => None,
			Scheme::Basic => self.0.encoded.as_ref().map(|encoded| format!("Basic {encoded}")),
			Scheme::Token => {
				let mut cache = self.0.cache.lock().await;

				if let Some(cached) = cache.access_token.clone() {
					if cache.validated_once {
						return Some(format!("Bearer {cached}"));
					}
					if token::validate(http, base_url, &cached).await {
						cache.validated_once = true;

						return Some(format!("Bearer {cached}"));
					}
				}

				let issued =
					token::issue(http, base_url, &self.0.username, &self.0.password).await?;
				let header = format!("Bearer {issued}");

				cache.access_token = Some(issued);
				cache.validated_once = true;

				Some(header)
			},
		}
	}

	/// Flags the cached token invalid so the next use re-validates and re-issues.
	pub async fn invalidate_token(&self) {
		let mut cache = self.0.cache.lock().await;

		cache.validated_once = false;
	}
}

fn validate(username: String, password: String) -> Result<(String, String), ConfigError> {
	if username.is_empty() || password.is_empty() {
		return Err(ConfigError::EmptyCredentials);
	}

	Ok((username, password))
}
