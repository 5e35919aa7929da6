use crate::{config::Config, rate_limit::PostRateLimiter, store::PostStore};
use std::sync::Arc;

/// Shared across all requests; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    pub limiter: Arc<PostRateLimiter>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            posts: PostStore::new(),
            limiter: Arc::new(PostRateLimiter::per_hour(config.posts_per_hour)),
        }
    }
}
