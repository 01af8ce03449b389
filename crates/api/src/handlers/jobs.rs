//! Handlers for the `/api/jobs` resource.
//!
//! Reads are public; writes require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use jobboard_core::error::CoreError;
use jobboard_core::types::DbId;
use jobboard_core::validation::JobInput;
use jobboard_db::models::job::Job;
use jobboard_db::repositories::job_repo::MAX_LIMIT;
use jobboard_db::repositories::{JobFilter, JobRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::JobListParams;
use crate::state::AppState;

/// Default page size when the caller asks for pagination without a limit.
const DEFAULT_LIMIT: i64 = 10;

/// Pagination envelope returned when `page` or `limit` is requested.
#[derive(Debug, Serialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /api/jobs?search=&page=&limit=
///
/// Jobs ordered by creation time descending. Without pagination params the
/// legacy bare-array shape is returned; with them, the [`JobPage`] envelope.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> AppResult<impl IntoResponse> {
    if !params.paginated() {
        let filter = JobFilter {
            search: params.search,
            ..JobFilter::default()
        };
        let jobs = JobRepo::list(&state.pool, &filter).await?;
        return Ok(Json(jobs).into_response());
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let filter = JobFilter {
        search: params.search,
        limit: Some(limit),
        offset: Some((page - 1) * limit),
    };

    let jobs = JobRepo::list(&state.pool, &filter).await?;
    let total = JobRepo::count(&state.pool, &filter).await?;

    Ok(Json(JobPage {
        jobs,
        total,
        page,
        limit,
    })
    .into_response())
}

/// GET /api/jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Job>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    Ok(Json(job))
}

/// POST /api/jobs (admin only)
///
/// Validate the whole payload; any failing rule rejects the request with a
/// structured field-error list and nothing is persisted.
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|errors| AppError::Core(CoreError::FieldValidation(errors)))?;

    let job = JobRepo::create(&state.pool, &input).await?;

    tracing::info!(job_id = job.id, admin = user.user_id, "Job created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": job.id,
            "message": "Job created successfully",
        })),
    ))
}

/// PUT /api/jobs/{id} (admin only)
pub async fn update(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<JobInput>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|errors| AppError::Core(CoreError::FieldValidation(errors)))?;

    JobRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;

    tracing::info!(job_id = id, admin = user.user_id, "Job updated");

    Ok(Json(serde_json::json!({
        "message": "Job updated successfully",
    })))
}

/// DELETE /api/jobs/{id} (admin only)
pub async fn delete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = JobRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Job", id }));
    }

    tracing::info!(job_id = id, admin = user.user_id, "Job deleted");

    Ok(Json(serde_json::json!({
        "message": "Job deleted successfully",
    })))
}
