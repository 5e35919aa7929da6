// ============================================================================
// ANONYMOUS COMPANY-EXPOSURE CONTENT SERVICE
// ============================================================================

// - Create, list, fetch and keyword-search posts
// - City filtering and pagination
// - Per-IP post rate limiting
// - CORS configuration
// - Input validation
// - Structured logging

pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod seed;
pub mod states;
pub mod store;

pub use config::Config;
pub use states::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use rate_limit::PostRateLimiter;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Builds the router with every route and middleware layer attached.
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/posts",
            post(routes::post::create_post).get(routes::post::list_posts),
        )
        .route(
            "/api/posts/search",
            post(routes::post::search_posts).get(routes::post::search_posts_by_query),
        )
        .route("/api/posts/{id}", get(routes::post::get_post))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(GlobalConcurrencyLimitLayer::new(
            config.max_concurrent_requests.get(),
        ))
        .layer(cors)
}

/// Serves the API on an already-bound listener until the process stops.
pub async fn serve(listener: TcpListener, config: Config) -> std::io::Result<()> {
    let state = AppState::new(&config);
    if config.seed_demo_posts {
        seed::seed_demo_posts(&state.posts);
    }

    spawn_limiter_pruning(Arc::clone(&state.limiter), LIMITER_PRUNE_INTERVAL);

    info!("Accepting connections on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app(state, &config).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

/// Periodically drops rate-limit state for clients that have been idle long
/// enough to have their full allowance back.
fn spawn_limiter_pruning(limiter: Arc<PostRateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            limiter.prune();
            debug!(clients = limiter.tracked_clients(), "Pruned rate limiter state");
        }
    })
}
