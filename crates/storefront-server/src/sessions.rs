use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use storefront_core::{Product, ProductCache};
use tokio::sync::Mutex;

pub const SESSION_ID_HEADER: &str = "x-session-id";

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

struct Session {
    cache: ProductCache,
    last_seen: Instant,
    /// Recency rank; higher is more recent.
    touched: u64,
}

#[derive(Default)]
struct Sessions {
    by_id: HashMap<String, Session>,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Per-session product caches, keyed by the `x-session-id` header value.
///
/// A single session's cache is never evicted, but whole sessions are: once
/// idle for longer than `idle`, or as the least recently used session when
/// `max_sessions` is reached.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<Sessions>>,
    max_sessions: usize,
    idle: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(max_sessions: usize, idle: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Sessions::default())),
            max_sessions: max_sessions.max(1),
            idle,
        }
    }

    /// Upserts `products` into the cache of `session_id`, creating it on first
    /// use.
    pub async fn record(&self, session_id: &str, products: impl IntoIterator<Item = Product>) {
        let mut sessions = self.sessions.lock().await;
        let touched = sessions.tick();
        let now = Instant::now();

        if !sessions.by_id.contains_key(session_id) {
            self.make_room(&mut sessions, now);
        }

        let session = sessions
            .by_id
            .entry(session_id.to_owned())
            .or_insert_with(|| Session {
                cache: ProductCache::new(),
                last_seen: now,
                touched,
            });
        session.last_seen = now;
        session.touched = touched;
        session.cache.upsert_all(products);
    }

    pub async fn get(&self, session_id: &str, product_id: &str) -> Option<Product> {
        let mut sessions = self.sessions.lock().await;
        let touched = sessions.tick();
        let idle = self.idle;

        let session = sessions.by_id.get_mut(session_id)?;
        if session.last_seen.elapsed() > idle {
            sessions.by_id.remove(session_id);
            return None;
        }
        session.last_seen = Instant::now();
        session.touched = touched;
        session.cache.get(product_id).cloned()
    }

    /// Number of sessions currently held.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.by_id.len()
    }

    /// Drops idle sessions, then the least recently used ones until a new
    /// session fits.
    fn make_room(&self, sessions: &mut Sessions, now: Instant) {
        let idle = self.idle;
        sessions
            .by_id
            .retain(|_, s| now.saturating_duration_since(s.last_seen) <= idle);

        while sessions.by_id.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .by_id
                .iter()
                .min_by_key(|(_, s)| s.touched)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            tracing::debug!(session = %oldest, "evicting least recently used session");
            sessions.by_id.remove(&oldest);
        }
    }
}

/// Session id carried by the request, if any.
pub fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
