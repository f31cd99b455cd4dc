use axum::{Router, Server, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use std::sync::Arc;
use termin_backend::{AppState, db::DbPool, realtime};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config =
        termin_backend::config::Config::from_env().expect("Failed to load configuration");
    termin_backend::init_tracing(&config);

    // Initialize database
    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .min_idle(Some(config.database_min_connections))
        .connection_timeout(std::time::Duration::from_secs(
            config.database_connection_timeout,
        ))
        .build(manager)
        .expect("Failed to create database connection pool");

    // Initialize Redis
    let redis =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");

    let addr = config
        .server_address()
        .parse()
        .expect("Invalid server address");

    // Application state
    let state = Arc::new(AppState::new(db, redis, config));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Background sweep for expired sessions
    tokio::spawn(termin_backend::start_session_cleanup_task(state.clone()));

    // Public routes: team creation and login
    let public_routes = termin_backend::routes::create_public_router(state.clone());

    // Everything else runs behind the session middleware
    let protected_routes = termin_backend::routes::create_router(state.clone()).layer(
        axum::middleware::from_fn_with_state(
            state.clone(),
            termin_backend::middleware::auth::auth_middleware,
        ),
    );

    let stream_routes = realtime::create_stream_routes().with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(stream_routes)
        .layer(cors)
        .layer(from_fn(termin_backend::middleware::logger::logger));

    tracing::info!("Server running at http://{}", addr);
    tracing::info!("Stream endpoint available at ws://{}/stream", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server error");
}
