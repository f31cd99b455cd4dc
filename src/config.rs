use crate::error::{AppError, AppResult};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    pub redis_url: String,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Lifetime of a login session; the channel code is a long-lived bearer
    /// credential, the session it opens is not.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// TTL of the Redis-cached token lookup; kept short so teardown takes
    /// effect quickly.
    #[serde(default = "default_session_cache_ttl")]
    pub session_cache_ttl_seconds: u64,

    #[serde(default = "default_channel_code_length")]
    pub channel_code_length: usize,

    /// Per-team broadcast buffer; a subscriber that falls further behind than
    /// this is told to resync instead of back-pressuring writers.
    #[serde(default = "default_stream_buffer_size")]
    pub stream_buffer_size: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_session_ttl() -> u64 {
    30 * 24 * 3600
} // 30 days
fn default_session_cache_ttl() -> u64 {
    60
}
fn default_channel_code_length() -> usize {
    8
}
fn default_stream_buffer_size() -> usize {
    256
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.session_ttl_seconds == 0 {
            return Err(AppError::Config(
                "SESSION_TTL_SECONDS must be > 0".to_string(),
            ));
        }

        if self.channel_code_length < 6 {
            return Err(AppError::Config(
                "CHANNEL_CODE_LENGTH must be at least 6".to_string(),
            ));
        }

        if self.stream_buffer_size == 0 {
            return Err(AppError::Config(
                "STREAM_BUFFER_SIZE must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_seconds as i64)
    }
}
