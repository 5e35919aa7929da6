use crate::errors::ApiError;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
};
use std::{convert::Infallible, net::SocketAddr, num::NonZeroU32};

type KeyedLimiter<C> =
    RateLimiter<String, DefaultKeyedStateStore<String>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Caps how many posts one client IP may create per hour.
///
/// A client gets its full allowance up front, then one post back per hour,
/// so no window shorter than an hour ever admits more than the allowance.
pub struct PostRateLimiter<C: Clock = DefaultClock> {
    limiter: KeyedLimiter<C>,
    per_hour: NonZeroU32,
}

impl PostRateLimiter {
    pub fn per_hour(per_hour: NonZeroU32) -> Self {
        Self::with_clock(per_hour, DefaultClock::default())
    }
}

impl<C: Clock> PostRateLimiter<C> {
    pub fn with_clock(per_hour: NonZeroU32, clock: C) -> Self {
        let quota = Quota::per_hour(NonZeroU32::MIN).allow_burst(per_hour);
        Self {
            limiter: RateLimiter::dashmap_with_clock(quota, clock),
            per_hour,
        }
    }

    pub fn check(&self, client_ip: &str) -> Result<(), ApiError> {
        self.limiter
            .check_key(&client_ip.to_string())
            .map_err(|_| {
                ApiError::RateLimited(format!(
                    "rate limit exceeded: maximum {} posts per hour",
                    self.per_hour
                ))
            })
    }

    /// Forgets clients whose allowance has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of client IPs currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Best-effort client address: proxy headers first, then the socket peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(client_ip(&parts.headers, peer)))
    }
}

fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
