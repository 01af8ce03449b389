//! Route definitions.

pub mod health;
pub mod jobs;
pub mod users;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;

use crate::middleware::rate_limit::RateLimiterCache;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register      register (public)
/// /users/login         login (public)
/// /users/me            current identity (requires auth)
///
/// /jobs                list (public), create (admin)
/// /jobs/{id}           get (public), update/delete (admin)
/// ```
///
/// `mutation_limiter` applies a stricter per-IP budget to the job write
/// routes; the general limiter is layered over the whole tree by the
/// router builder.
pub fn api_routes(mutation_limiter: RateLimiterCache) -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/jobs", jobs::router(mutation_limiter))
        // Unknown /api paths must 404 as JSON, never fall through to the
        // SPA index fallback.
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    let body = serde_json::json!({
        "error": "Not found",
        "code": "NOT_FOUND",
    });
    (StatusCode::NOT_FOUND, axum::Json(body))
}
