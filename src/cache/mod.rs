pub mod redis;
pub mod session_cache;

pub use session_cache::{CachedSession, SessionCache};
