use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::redis::{delete_cache, get_cache, set_cache};

/// 会话缓存键前缀
const SESSION_CACHE_PREFIX: &str = "session:";

/// The cached side of a session row: enough to rebuild a `RequestContext`
/// without touching Postgres on every request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CachedSession {
    pub team_id: Uuid,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Session token cache. Strictly best-effort: a Redis outage degrades every
/// lookup to a database round-trip, never to an auth failure.
#[derive(Clone)]
pub struct SessionCache {
    client: redis::Client,
    ttl_seconds: u64,
}

impl SessionCache {
    pub fn new(client: redis::Client, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    fn key(token: Uuid) -> String {
        format!("{}{}", SESSION_CACHE_PREFIX, token)
    }

    pub async fn get(&self, token: Uuid) -> Option<CachedSession> {
        let cached: CachedSession = get_cache(&self.client, &Self::key(token)).await?;
        // A cached entry may outlive the session row's expiry within the
        // cache TTL window; re-check here.
        if cached.expires_at <= chrono::Utc::now() {
            return None;
        }
        Some(cached)
    }

    pub async fn put(&self, token: Uuid, session: &CachedSession) {
        set_cache(&self.client, &Self::key(token), session, self.ttl_seconds).await;
    }

    pub async fn invalidate(&self, token: Uuid) {
        delete_cache(&self.client, &Self::key(token)).await;
    }
}
