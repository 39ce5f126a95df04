use std::{future::Future, hash::Hash, sync::atomic::{AtomicU64, Ordering}};

use dashmap::DashMap;

/// Keyed read cache with explicit invalidation.
///
/// Values stay until someone marks them stale, there is no expiry. Every successful
/// mutation is expected to mark the keys it touched, the next read refetches.
///
/// Marking stale drops the entry and bumps a generation counter. A fetch which started
/// before any invalidation never lands in the store, so a reader racing a writer can't
/// park the old value as fresh.
pub struct Store<K, V> {
	entries: DashMap<K, V>,
	generation: AtomicU64,
	enabled: bool,
}

impl<K: Eq + Hash + Clone, V: Clone> Default for Store<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Eq + Hash + Clone, V: Clone> Store<K, V> {
	pub fn new() -> Self {
		Store { entries: DashMap::new(), generation: AtomicU64::new(0), enabled: true }
	}

	/// a store which never keeps anything, every read goes to the fetcher
	pub fn disabled() -> Self {
		Store { entries: DashMap::new(), generation: AtomicU64::new(0), enabled: false }
	}

	/// fresh value for this key, if any
	pub fn get(&self, key: &K) -> Option<V> {
		self.entries.get(key).map(|v| v.value().clone())
	}

	pub fn put(&self, key: K, value: V) {
		if !self.enabled {
			return;
		}
		self.entries.insert(key, value);
	}

	/// returns true if there was something to drop
	pub fn mark_stale(&self, key: &K) -> bool {
		self.generation.fetch_add(1, Ordering::SeqCst);
		self.entries.remove(key).is_some()
	}

	pub fn mark_stale_where(&self, pred: impl Fn(&K) -> bool) -> usize {
		self.generation.fetch_add(1, Ordering::SeqCst);
		let before = self.entries.len();
		self.entries.retain(|k, _| !pred(k));
		before.saturating_sub(self.entries.len())
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Cached value if fresh, otherwise runs `fetch` and remembers its result, unless
	/// something was marked stale while fetching. Failed fetches are not cached.
	pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<V, E>>,
	{
		if let Some(hit) = self.get(&key) {
			return Ok(hit);
		}

		let started = self.generation.load(Ordering::SeqCst);
		let value = fetch().await?;

		if self.generation.load(Ordering::SeqCst) == started {
			self.put(key.clone(), value.clone());
			// an invalidation may have slipped in between the check and the insert
			if self.generation.load(Ordering::SeqCst) != started {
				self.entries.remove(&key);
			}
		}

		Ok(value)
	}
}

#[cfg(test)]
mod test {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::Store;

	#[tokio::test]
	async fn refetches_only_after_mark_stale() {
		let store : Store<i64, String> = Store::new();
		let counter = AtomicUsize::new(0);
		let calls = &counter;
		let fetch = || async move {
			calls.fetch_add(1, Ordering::SeqCst);
			Ok::<_, std::convert::Infallible>("ledger".to_string())
		};

		assert_eq!(store.get_or_fetch(1, fetch).await.unwrap(), "ledger");
		assert_eq!(store.get_or_fetch(1, fetch).await.unwrap(), "ledger");
		assert_eq!(counter.load(Ordering::SeqCst), 1);

		assert!(store.mark_stale(&1));
		assert!(store.get(&1).is_none());
		store.get_or_fetch(1, fetch).await.unwrap();
		assert_eq!(counter.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn failed_fetch_is_not_cached() {
		let store : Store<i64, u32> = Store::new();
		let res = store.get_or_fetch(7, || async { Err::<u32, _>("db down") }).await;
		assert_eq!(res, Err("db down"));
		assert!(store.is_empty());

		let res = store.get_or_fetch(7, || async { Ok::<_, &str>(3) }).await;
		assert_eq!(res, Ok(3));
		assert_eq!(store.get(&7), Some(3));
	}

	#[test]
	fn mark_stale_where_matches_keys() {
		let store : Store<(i64, i64), u32> = Store::new();
		store.put((1, 1), 10);
		store.put((1, 2), 20);
		store.put((2, 1), 30);

		assert_eq!(store.mark_stale_where(|(company, _)| *company == 1), 2);
		assert_eq!(store.get(&(1, 1)), None);
		assert_eq!(store.get(&(2, 1)), Some(30));
		assert!(!store.mark_stale(&(9, 9)));
	}

	#[tokio::test]
	async fn invalidation_during_fetch_is_not_lost() {
		let store : Store<i64, &str> = Store::new();
		let writer = &store;

		// a write commits while the read is still in flight
		let res = store.get_or_fetch(1, || async move {
			assert!(!writer.mark_stale(&1));
			Ok::<_, std::convert::Infallible>("old ledger")
		}).await;

		assert_eq!(res.unwrap(), "old ledger");
		assert!(store.get(&1).is_none());

		let res = store.get_or_fetch(1, || async { Ok::<_, std::convert::Infallible>("new ledger") }).await;
		assert_eq!(res.unwrap(), "new ledger");
		assert_eq!(store.get(&1), Some("new ledger"));
	}

	#[test]
	fn stale_entries_are_dropped() {
		let store : Store<i64, u32> = Store::new();
		store.put(1, 1);
		store.put(2, 2);
		assert!(store.mark_stale(&1));
		assert!(store.mark_stale(&2));
		assert!(store.is_empty());
	}

	#[test]
	fn disabled_store_keeps_nothing() {
		let store : Store<i64, u32> = Store::disabled();
		store.put(1, 1);
		assert!(store.get(&1).is_none());
		assert!(store.is_empty());
	}
}
