use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::storage::Storage;

pub const DEFAULT_SESSION_LIMIT: usize = 10_000;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pub session_limit: usize,
    pub storage: Arc<dyn Storage>,
    pub catalog: Arc<Catalog>,
    clock: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, catalog: Catalog) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_limit: DEFAULT_SESSION_LIMIT,
            storage,
            catalog: Arc::new(catalog),
            clock: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_session_limit(mut self, limit: usize) -> Self {
        self.session_limit = limit.max(1);
        self
    }

    /// Monotonic counter used to order session accesses.
    pub fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::new(Arc::new(crate::storage::MemoryStorage::default()), catalog)
    }
}

/// A browser session. Holding its write lock serializes the watchlist
/// updates of that session.
pub struct Session {
    pub csrf_token: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            csrf_token: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// A slot of the session table. The access tick lives outside the session
/// lock so eviction never waits on a busy session.
pub struct SessionEntry {
    pub session: Arc<RwLock<Session>>,
    last_seen: AtomicU64,
}

impl SessionEntry {
    pub fn new(tick: u64) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            last_seen: AtomicU64::new(tick),
        }
    }

    pub fn touch(&self, tick: u64) {
        self.last_seen.store(tick, Ordering::Relaxed);
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen.load(Ordering::Relaxed)
    }
}
