use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

/// Best-effort cache read; any Redis or decode failure degrades to a miss.
pub async fn get_cache<T: DeserializeOwned>(client: &redis::Client, key: &str) -> Option<T> {
    let mut conn = client.get_multiplexed_async_connection().await.ok()?;
    let value: String = conn.get(key).await.ok()?;
    serde_json::from_str(&value).ok()
}

pub async fn set_cache<T: Serialize>(client: &redis::Client, key: &str, value: &T, ttl: u64) {
    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(key, error = %e, "Skipping cache write, Redis unreachable");
            return;
        }
    };
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "Skipping cache write, serialization failed");
            return;
        }
    };
    if let Err(e) = conn.set_ex::<_, _, ()>(key, json, ttl).await {
        tracing::warn!(key, error = %e, "Cache write failed");
    }
}

pub async fn delete_cache(client: &redis::Client, key: &str) {
    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(key, error = %e, "Skipping cache delete, Redis unreachable");
            return;
        }
    };
    if let Err(e) = conn.del::<_, ()>(key).await {
        tracing::warn!(key, error = %e, "Cache delete failed");
    }
}
