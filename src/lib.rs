pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::cache::SessionCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::realtime::FanoutHub;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub session_cache: SessionCache,
    pub fanout: FanoutHub,
}

impl AppState {
    pub fn new(db: DbPool, redis: redis::Client, config: Config) -> Self {
        let session_cache = SessionCache::new(redis.clone(), config.session_cache_ttl_seconds);
        let fanout = FanoutHub::new(config.stream_buffer_size);
        Self {
            db,
            redis,
            config: Arc::new(config),
            session_cache,
            fanout,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let level_filter = match config.log_level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    unsafe {
        std::env::set_var("RUST_LOG", level_filter);
    }

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().init();
        }
        _ => {
            tracing_subscriber::fmt().init();
        }
    }
}

/// Background sweep for expired session rows. The auth path already refuses
/// expired tokens; this only keeps the table from growing unbounded.
pub async fn start_session_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(3600));

    loop {
        interval.tick().await;
        tracing::debug!("Running expired session cleanup");

        let mut conn = match db::get_conn(&state.db) {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Session cleanup skipped, no database connection");
                continue;
            }
        };

        match db::repositories::SessionsRepo::delete_expired(&mut conn, chrono::Utc::now()) {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Expired sessions removed"),
            Err(e) => tracing::warn!(error = %e, "Session cleanup failed"),
        }
    }
}
