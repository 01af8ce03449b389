//! Per-IP rate limiting.
//!
//! Each client IP gets its own `governor` limiter, held in a bounded,
//! TTL-pruned map. State is process-local and resets on restart, which is
//! acceptable at this traffic level. Two instances are wired in the router:
//! a general budget for all API traffic and a stricter one for mutating job
//! requests.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use tokio::sync::RwLock;

/// Limiter for a single client IP.
type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Maximum number of IPs to track. Prevents unbounded memory growth from
/// clients spread across many addresses.
const MAX_ENTRIES: usize = 10_000;

/// How long an idle per-IP limiter is kept before pruning.
const ENTRY_TTL: Duration = Duration::from_secs(3600);

/// Per-IP rate limiter cache.
#[derive(Clone)]
pub struct RateLimiterCache {
    limiters: Arc<RwLock<HashMap<IpAddr, (Arc<IpRateLimiter>, Instant)>>>,
    quota: Quota,
}

impl RateLimiterCache {
    /// Create a cache allowing `per_minute` requests per client IP.
    pub fn new(per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(per_minute.max(1)).unwrap();
        Self {
            limiters: Arc::new(RwLock::new(HashMap::new())),
            quota: Quota::per_minute(per_minute),
        }
    }

    /// Record one request from `ip`. Returns `false` when over budget.
    pub async fn check(&self, ip: IpAddr) -> bool {
        self.limiter_for(ip).await.check().is_ok()
    }

    async fn limiter_for(&self, ip: IpAddr) -> Arc<IpRateLimiter> {
        {
            let limiters = self.limiters.read().await;
            if let Some((limiter, _)) = limiters.get(&ip) {
                return Arc::clone(limiter);
            }
        }

        let mut limiters = self.limiters.write().await;
        // Re-check after acquiring the write lock.
        if let Some((limiter, _)) = limiters.get(&ip) {
            return Arc::clone(limiter);
        }

        if limiters.len() >= MAX_ENTRIES {
            let now = Instant::now();
            limiters.retain(|_, (_, seen)| now.duration_since(*seen) < ENTRY_TTL);
        }

        let limiter = Arc::new(RateLimiter::direct(self.quota));
        limiters.insert(ip, (Arc::clone(&limiter), Instant::now()));
        limiter
    }
}

/// Axum middleware enforcing a [`RateLimiterCache`] budget.
///
/// Wire with `axum::middleware::from_fn_with_state(cache, rate_limit)`.
pub async fn rate_limit(
    State(cache): State<RateLimiterCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);

    if !cache.check(ip).await {
        tracing::warn!(%ip, path = %request.uri().path(), "Rate limit exceeded");
        let body = serde_json::json!({
            "error": "Too many requests, please try again later",
            "code": "RATE_LIMITED",
        });
        return (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
    }

    next.run(request).await
}

/// Like [`rate_limit`], but only debits the budget for mutating methods
/// (anything other than GET/HEAD/OPTIONS). Layered over the job routes so
/// writes get a stricter budget while reads stay on the general one.
pub async fn mutation_rate_limit(
    State(cache): State<RateLimiterCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return next.run(request).await;
    }
    rate_limit(State(cache), request, next).await
}

/// Resolve the client IP: `X-Forwarded-For` first (reverse-proxy setups),
/// then the connection peer address, then loopback (router-only tests).
fn client_ip(request: &Request<Body>) -> IpAddr {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());
    if let Some(ip) = forwarded {
        return ip;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
