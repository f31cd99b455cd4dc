pub mod events;
pub mod fanout;
pub mod handler;

pub use events::{ChangeEvent, ChangeOp, ClientFrame, EntityKind, ServerFrame};
pub use fanout::FanoutHub;
pub use handler::{StreamHandler, StreamQuery};

use crate::AppState;
use std::sync::Arc;

pub fn create_stream_routes() -> axum::Router<Arc<AppState>> {
    use axum::routing::get;

    axum::Router::new().route("/stream", get(StreamHandler::stream_handler))
}
