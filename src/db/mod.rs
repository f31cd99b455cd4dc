pub mod enums;
pub mod models;
pub mod repositories;

use std::time::Duration;

use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};

use crate::error::AppError;

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;
pub type DbConn = r2d2::PooledConnection<DbConnectionManager<PgConnection>>;

const CHECKOUT_ATTEMPTS: u32 = 3;
const CHECKOUT_TIMEOUT: Duration = Duration::from_millis(500);

/// Checks out a pooled connection, retrying a bounded number of times before
/// surfacing `Unavailable` so callers get a 503 instead of a hard failure on
/// transient pool exhaustion.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, AppError> {
    let mut last_err = None;
    for attempt in 1..=CHECKOUT_ATTEMPTS {
        match pool.get_timeout(CHECKOUT_TIMEOUT) {
            Ok(conn) => return Ok(conn),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Database connection checkout failed");
                last_err = Some(e);
            }
        }
    }
    Err(AppError::unavailable(format!(
        "Database unavailable: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    )))
}
