//! Route definitions for the `/api/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::middleware::rate_limit::{mutation_rate_limit, RateLimiterCache};
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /       -> list (public)
/// POST   /       -> create (admin, strict rate limit)
/// GET    /{id}   -> get (public)
/// PUT    /{id}   -> update (admin, strict rate limit)
/// DELETE /{id}   -> delete (admin, strict rate limit)
/// ```
///
/// `mutation_limiter` only debits on mutating methods, so reads stay on the
/// general budget alone.
pub fn router(mutation_limiter: RateLimiterCache) -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list).post(jobs::create))
        .route(
            "/{id}",
            get(jobs::get_by_id).put(jobs::update).delete(jobs::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            mutation_limiter,
            mutation_rate_limit,
        ))
}
