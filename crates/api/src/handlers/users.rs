//! Handlers for the `/api/users` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use jobboard_core::error::CoreError;
use jobboard_core::roles::ROLE_USER;
use jobboard_core::types::DbId;
use jobboard_core::validation::{LoginInput, RegisterInput};
use jobboard_db::models::user::{CreateUser, UserResponse};
use jobboard_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Generic login failure message. Identical for unknown email and wrong
/// password so the response does not leak which field was wrong.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserResponse,
}

/// Successful registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: DbId,
}

/// POST /api/users/register
///
/// Validate the payload, reject duplicate emails with 409 Conflict, and
/// insert a new user with role `user`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    input
        .validate()
        .map_err(|errors| AppError::Core(CoreError::FieldValidation(errors)))?;

    let email = input.email.trim().to_lowercase();

    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already in use".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still hit the UNIQUE constraint here;
    // the error classifier maps that to 409 as well.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: user.id,
        }),
    ))
}

/// POST /api/users/login
///
/// Authenticate with email + password. On success returns a signed
/// time-limited bearer token and the public user info.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: UserResponse::from(&user),
    }))
}

/// GET /api/users/me
///
/// Echo the verified identity claims of the presented token.
pub async fn me(user: AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "user": {
            "id": user.user_id,
            "email": user.email,
            "role": user.role,
        }
    }))
}
