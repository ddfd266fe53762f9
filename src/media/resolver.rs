//! Signed media resolver and cache
//!
//! The only stateful, concurrency-sensitive component of the engine. All
//! state is owned by the resolver instance (no module globals), so tests
//! construct fresh resolvers with empty caches.
//!
//! Correctness property: N concurrent callers for the same canonical path
//! produce exactly one outbound issuance call, and all N observe the same
//! resolved value. The multi-step check-cache / check-in-flight / register /
//! issue / deregister sequence is made per-key atomic by holding one mutex
//! over the whole map state across every read-modify step; the lock is
//! never held across an await.

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::path::{extract_storage_path, is_usable_url};
use crate::common::traits::{MediaFetcher, SignedUrlIssuer};
use crate::common::types::Signal;

/// Entries beyond this count trigger an opportunistic purge of expired ones
const CACHE_PURGE_THRESHOLD: usize = 1024;

/// A cached signed URL with its issuance time
#[derive(Debug, Clone)]
struct CachedSignedUrl {
    url: String,
    issued_at: Instant,
}

/// Shared pending resolution for one canonical path
type InFlightResolution = Shared<BoxFuture<'static, Option<String>>>;

#[derive(Default)]
struct ResolverState {
    /// Canonical path -> issued signed URL
    cache: HashMap<String, CachedSignedUrl>,
    /// Canonical path -> single shared pending issuance
    in_flight: HashMap<String, InFlightResolution>,
    /// Resolved URLs already fetched into the image pipeline at least once
    preloaded: HashSet<String>,
}

/// Resolver for analysis media references
///
/// Parses raw references into canonical storage paths, issues signed-URL
/// requests, deduplicates concurrent requests for the same path, caches
/// results for the issuance TTL and optionally preloads image bytes.
#[derive(Clone)]
pub struct MediaResolver {
    issuer: Arc<dyn SignedUrlIssuer>,
    fetcher: Arc<dyn MediaFetcher>,
    state: Arc<Mutex<ResolverState>>,
    bucket: String,
    ttl: Duration,
}

impl MediaResolver {
    /// Create a resolver with the default 3600 s signed-URL TTL
    pub fn new(
        issuer: Arc<dyn SignedUrlIssuer>,
        fetcher: Arc<dyn MediaFetcher>,
        bucket: impl Into<String>,
    ) -> Self {
        Self::with_ttl(issuer, fetcher, bucket, Duration::from_secs(3600))
    }

    /// Create a resolver with a custom signed-URL TTL
    pub fn with_ttl(
        issuer: Arc<dyn SignedUrlIssuer>,
        fetcher: Arc<dyn MediaFetcher>,
        bucket: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            issuer,
            fetcher,
            state: Arc::new(Mutex::new(ResolverState::default())),
            bucket: bucket.into(),
            ttl,
        }
    }

    /// Resolve a raw media reference to a displayable URL
    ///
    /// Returns the signed URL for storage-backed references, the raw input
    /// unchanged when it is a usable non-storage URL, and `None` otherwise.
    /// Issuance failures are recovered to passthrough/`None`, never an
    /// error to the caller.
    pub async fn resolve(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let Some(path) = extract_storage_path(raw, &self.bucket) else {
            return passthrough(raw);
        };

        let pending = {
            let mut state = self.state.lock().expect("resolver state poisoned");

            if let Some(entry) = state.cache.get(&path) {
                if entry.issued_at.elapsed() < self.ttl {
                    return Some(entry.url.clone());
                }
                // Signed URL outlived its validity window; reissue.
                state.cache.remove(&path);
            }

            if let Some(pending) = state.in_flight.get(&path) {
                pending.clone()
            } else {
                let pending = self.issuance_future(path.clone(), raw.to_string());
                state.in_flight.insert(path.clone(), pending.clone());
                // Detached driver: callers that stop awaiting must not
                // abandon the shared work, and the cache must still be
                // populated for subsequent callers.
                tokio::spawn(pending.clone());
                pending
            }
        };

        pending.await
    }

    /// Build the single shared issuance future for a canonical path
    ///
    /// On completion the in-flight entry is removed unconditionally, under
    /// the same lock acquisition that populates the cache on success, so no
    /// caller can observe a torn state between the two maps.
    fn issuance_future(&self, path: String, raw: String) -> InFlightResolution {
        let issuer = Arc::clone(&self.issuer);
        let state = Arc::clone(&self.state);
        let ttl = self.ttl;

        async move {
            let result = issuer.create_signed_url(&path, ttl).await;

            let mut guard = state.lock().expect("resolver state poisoned");
            guard.in_flight.remove(&path);

            match result {
                Ok(url) => {
                    if guard.cache.len() >= CACHE_PURGE_THRESHOLD {
                        guard.cache.retain(|_, e| e.issued_at.elapsed() < ttl);
                    }
                    guard.cache.insert(
                        path,
                        CachedSignedUrl {
                            url: url.clone(),
                            issued_at: Instant::now(),
                        },
                    );
                    Some(url)
                }
                Err(err) => {
                    if err.is_retryable() {
                        debug!(%path, error = %err, "signed url issuance failed (transient)");
                    } else {
                        warn!(%path, error = %err, "signed url issuance failed");
                    }
                    passthrough(&raw)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Resolve a reference and prefetch the resulting URL once
    ///
    /// Best-effort: the URL is marked attempted before the fetch, so
    /// concurrent preloads collapse to one attempt and a failed load is
    /// never retried indefinitely. Completes once the attempt finishes,
    /// success or failure.
    pub async fn preload(&self, raw: &str) {
        let Some(url) = self.resolve(raw).await else {
            return;
        };

        {
            let mut state = self.state.lock().expect("resolver state poisoned");
            if !state.preloaded.insert(url.clone()) {
                return;
            }
        }

        if let Err(err) = self.fetcher.prefetch(&url).await {
            debug!(%url, error = %err, "media preload failed");
        }
    }

    /// Preload a signal's analysis media, if any
    pub async fn preload_signal_media(&self, signal: &Signal) {
        let Some(raw) = signal.analysis_media.as_deref() else {
            return;
        };
        if raw.trim().is_empty() {
            return;
        }
        self.preload(raw).await;
    }

    /// Number of cached signed URLs (test and diagnostics hook)
    pub fn cached_len(&self) -> usize {
        self.state.lock().expect("resolver state poisoned").cache.len()
    }
}

/// Raw references that are themselves usable URLs render as-is
fn passthrough(raw: &str) -> Option<String> {
    if is_usable_url(raw) {
        Some(raw.to_string())
    } else {
        None
    }
}
