//! Per-client endpoint call statistics.
//!
//! The counter map is owned by one [`Client`](crate::client::Client) instance and injected at
//! construction, so separate clients never interfere with each other. Increments run under a
//! lock; the optional observer callback fires after the new count is committed.

// self
use crate::_prelude::*;

/// Callback invoked with `(endpoint, new_count)` after every recorded call.
pub type StatsObserver = Arc<dyn Fn(&str, u64) + Send + Sync>;

/// Process-local mapping from endpoint name to completed-call count.
///
/// Counts are bucketed by the endpoint's first path segment (`posts/7` counts as `posts`) and
/// incremented only for successfully classified responses.
#[derive(Clone, Default)]
pub struct EndpointStats {
	counts: Arc<RwLock<HashMap<String, u64>>>,
	observer: Option<StatsObserver>,
}
impl EndpointStats {
	/// Creates an empty statistics map with no observer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an observer fired after each increment.
	pub fn with_observer(mut self, observer: impl Fn(&str, u64) + Send + Sync + 'static) -> Self {
		self.observer = Some(Arc::new(observer));

		self
	}

	/// Returns the recorded call count for an endpoint bucket.
	pub fn count(&self, endpoint: &str) -> u64 {
		self.counts.read().get(Self::bucket(endpoint)).copied().unwrap_or(0)
	}

	/// Returns a snapshot of every bucket and its count.
	pub fn snapshot(&self) -> HashMap<String, u64> {
		self.counts.read().clone()
	}

	pub(crate) fn record(&self, endpoint: &str) {
		let bucket = Self::bucket(endpoint);
		let updated = {
			let mut counts = self.counts.write();
			let slot = counts.entry(bucket.to_owned()).or_insert(0);

			*slot += 1;

			*slot
		};

		if let Some(observer) = self.observer.as_ref() {
			observer(bucket, updated);
		}
	}

	fn bucket(endpoint: &str) -> &str {
		endpoint.split('/').next().unwrap_or(endpoint)
	}
}
impl Debug for EndpointStats {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EndpointStats")
			.field("counts", &*self.counts.read())
			.field("observer_set", &self.observer.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU64, Ordering};
	// self
	use super::*;

	#[test]
	fn item_paths_bucket_under_their_collection() {
		let stats = EndpointStats::new();

		stats.record("posts");
		stats.record("posts/17");
		stats.record("users");

		assert_eq!(stats.count("posts"), 2);
		assert_eq!(stats.count("posts/99"), 2);
		assert_eq!(stats.count("users"), 1);
		assert_eq!(stats.count("media"), 0);
	}

	#[test]
	fn observer_sees_committed_counts() {
		let seen = Arc::new(AtomicU64::new(0));
		let seen_by_observer = seen.clone();
		let stats = EndpointStats::new().with_observer(move |endpoint, count| {
			assert_eq!(endpoint, "categories");
			seen_by_observer.store(count, Ordering::SeqCst);
		});

		stats.record("categories");
		stats.record("categories");

		assert_eq!(seen.load(Ordering::SeqCst), 2);
	}
}
