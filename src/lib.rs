//! Fluent, envelope-normalized client for content-management REST APIs with request builders,
//! basic/token auth, and bounded in-flight concurrency.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod model;
pub mod obs;
pub mod request;
pub mod stats;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::client::Client;

	/// Builds a [`Client`] pointed at a mock server, with a small concurrency cap and a short
	/// timeout so failing tests do not hang.
	pub fn build_test_client(base_url: &str) -> Result<Client> {
		Client::builder(base_url)?
			.with_timeout(Duration::from_secs(5))
			.with_concurrency_cap(4)
			.build()
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::{Mutex as AsyncMutex, Semaphore};
	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
