//! Stale-while-revalidate cache in front of [`Catalog::get_by_id`].
//!
//! A fresh entry is served as is. A stale entry is still served, and at most
//! one background refresh per id runs at a time. Misses are fetched inline and
//! only successful lookups are stored.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_cms::{Catalog, CatalogError};
use storefront_core::Product;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct CachedDetail {
    product: Product,
    fetched_at: Instant,
    refreshing: bool,
}

impl CachedDetail {
    fn new(product: Product) -> Self {
        Self {
            product,
            fetched_at: Instant::now(),
            refreshing: false,
        }
    }
}

struct Inner {
    catalog: Arc<Catalog>,
    revalidate_after: Duration,
    entries: Mutex<HashMap<String, CachedDetail>>,
}

#[derive(Clone)]
pub struct DetailCache {
    inner: Arc<Inner>,
}

impl DetailCache {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, revalidate_after: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                revalidate_after,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the product for `id`, from cache when possible.
    ///
    /// # Errors
    ///
    /// Only a cache miss can fail, with whatever [`Catalog::get_by_id`]
    /// returned.
    pub async fn get(&self, id: &str) -> Result<Product, CatalogError> {
        let (result, _refresh) = self.lookup(id).await;
        result
    }

    /// Like [`DetailCache::get`], also handing back the background refresh
    /// when one was started.
    pub(crate) async fn lookup(
        &self,
        id: &str,
    ) -> (Result<Product, CatalogError>, Option<JoinHandle<()>>) {
        let cached = {
            let mut entries = self.inner.entries.lock().await;
            entries.get_mut(id).map(|entry| {
                let start_refresh = !entry.refreshing
                    && entry.fetched_at.elapsed() >= self.inner.revalidate_after;
                if start_refresh {
                    entry.refreshing = true;
                }
                (entry.product.clone(), start_refresh)
            })
        };
        if let Some((product, start_refresh)) = cached {
            let refresh = start_refresh.then(|| self.spawn_refresh(id.to_owned()));
            return (Ok(product), refresh);
        }

        let result = self.inner.catalog.get_by_id(id).await;
        if let Ok(product) = &result {
            self.inner
                .entries
                .lock()
                .await
                .insert(id.to_owned(), CachedDetail::new(product.clone()));
        }
        (result, None)
    }

    fn spawn_refresh(&self, id: String) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tracing::debug!(id = %id, "revalidating product detail");
            let result = inner.catalog.get_by_id(&id).await;
            let mut entries = inner.entries.lock().await;
            match result {
                Ok(product) => {
                    entries.insert(id, CachedDetail::new(product));
                }
                Err(CatalogError::NotFound { .. }) => {
                    tracing::info!(id = %id, "product removed upstream; evicting cached detail");
                    entries.remove(&id);
                }
                Err(error) => {
                    tracing::warn!(id = %id, %error, "revalidation failed; keeping stale detail");
                    if let Some(entry) = entries.get_mut(&id) {
                        entry.refreshing = false;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::{entry_body, test_catalog, ENTRIES_PATH};

    const LONG: Duration = Duration::from_secs(3600);

    fn cache(server: &MockServer, revalidate_after: Duration) -> DetailCache {
        DetailCache::new(Arc::new(test_catalog(&server.uri())), revalidate_after)
    }

    async fn mount_once(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("{ENTRIES_PATH}/p1")))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(server)
            .await;
    }

    async fn mount_always(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("{ENTRIES_PATH}/p1")))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn ok(title: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(entry_body("p1", title))
    }

    #[tokio::test]
    async fn fresh_entry_is_served_without_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{ENTRIES_PATH}/p1")))
            .respond_with(ok("Old"))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache(&server, LONG);
        assert_eq!(cache.get("p1").await.expect("first").title, "Old");
        let (second, refresh) = cache.lookup("p1").await;
        assert_eq!(second.expect("second").title, "Old");
        assert!(refresh.is_none());
    }

    #[tokio::test]
    async fn stale_entry_is_served_then_replaced() {
        let server = MockServer::start().await;
        mount_once(&server, ok("Old")).await;
        mount_always(&server, ok("New")).await;

        let cache = cache(&server, Duration::ZERO);
        assert_eq!(cache.get("p1").await.expect("miss").title, "Old");

        let (stale, refresh) = cache.lookup("p1").await;
        assert_eq!(stale.expect("stale").title, "Old");
        refresh.expect("refresh spawned").await.expect("refresh task");

        let (refreshed, _) = cache.lookup("p1").await;
        assert_eq!(refreshed.expect("refreshed").title, "New");
    }

    #[tokio::test]
    async fn only_one_refresh_runs_at_a_time() {
        let server = MockServer::start().await;
        mount_once(&server, ok("Old")).await;
        mount_always(
            &server,
            ok("New").set_delay(Duration::from_millis(200)),
        )
        .await;

        let cache = cache(&server, Duration::ZERO);
        cache.get("p1").await.expect("miss");

        let (_, first) = cache.lookup("p1").await;
        let (during, second) = cache.lookup("p1").await;
        assert_eq!(during.expect("stale").title, "Old");
        assert!(second.is_none());
        first.expect("refresh spawned").await.expect("refresh task");
    }

    #[tokio::test]
    async fn refresh_not_found_evicts_entry() {
        let server = MockServer::start().await;
        mount_once(&server, ok("Old")).await;
        mount_always(&server, ResponseTemplate::new(404)).await;

        let cache = cache(&server, Duration::ZERO);
        cache.get("p1").await.expect("miss");

        let (stale, refresh) = cache.lookup("p1").await;
        assert!(stale.is_ok());
        refresh.expect("refresh spawned").await.expect("refresh task");

        let err = cache.get("p1").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn refresh_failure_keeps_stale_entry() {
        let server = MockServer::start().await;
        mount_once(&server, ok("Old")).await;
        mount_always(&server, ResponseTemplate::new(500)).await;

        let cache = cache(&server, Duration::ZERO);
        cache.get("p1").await.expect("miss");

        let (_, refresh) = cache.lookup("p1").await;
        refresh.expect("refresh spawned").await.expect("refresh task");

        let (kept, retry) = cache.lookup("p1").await;
        assert_eq!(kept.expect("stale kept").title, "Old");
        assert!(retry.is_some(), "a failed refresh allows the next one");
    }

    #[tokio::test]
    async fn failed_miss_is_not_cached() {
        let server = MockServer::start().await;
        mount_once(&server, ResponseTemplate::new(500)).await;
        mount_always(&server, ok("Recovered")).await;

        let cache = cache(&server, LONG);
        assert!(matches!(
            cache.get("p1").await,
            Err(CatalogError::Fetch(_))
        ));
        assert_eq!(cache.get("p1").await.expect("retry").title, "Recovered");
    }
}
