//! HTTP-level integration tests for the `/api/users` endpoints.
//!
//! Tests cover registration (validation, duplicate emails), login
//! (including the generic credential error), and the `/me` identity echo.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use sqlx::SqlitePool;

use jobboard_api::auth::password::hash_password;
use jobboard_db::models::user::{CreateUser, User};
use jobboard_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
async fn create_test_user(pool: &SqlitePool, email: &str, role: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: hashed,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the JSON response containing `token`
/// and `user` info.
async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/users/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration tests
// ---------------------------------------------------------------------------

/// A valid registration returns 201 with the new user id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "password": "analytical"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User registered successfully");
    assert!(json["user_id"].is_number());

    // The stored row has the default role and a hashed (not plaintext) password.
    let user = UserRepo::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .expect("registered user must exist");
    assert_eq!(user.role, "user");
    assert_ne!(user.password_hash, "analytical");
}

/// Email matching is case-insensitive: addresses are lowercased on write.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_normalizes_email(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "name": "Case Test",
        "email": "MixedCase@Example.COM",
        "password": "secret-enough"
    });
    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = UserRepo::find_by_email(&pool, "mixedcase@example.com")
        .await
        .unwrap();
    assert!(user.is_some(), "email should be stored lowercased");
}

/// Registering an already-used email returns 409 Conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflict(pool: SqlitePool) {
    create_test_user(&pool, "taken@example.com", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Second User",
        "email": "taken@example.com",
        "password": "secret-enough"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Email already in use");
}

/// An invalid payload reports every failing field at once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation_reports_all_fields(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "A",
        "email": "not-an-email",
        "password": "short"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let errors = json["errors"].as_array().expect("errors must be an array");
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

// ---------------------------------------------------------------------------
// Login tests
// ---------------------------------------------------------------------------

/// Successful login returns 200 with token and public user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: SqlitePool) {
    let (user, password) = create_test_user(&pool, "login@example.com", "admin").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "login@example.com", &password).await;

    assert_eq!(json["message"], "Login successful");
    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@example.com");
    assert_eq!(json["user"]["role"], "admin");
    // The password hash must never appear in a response.
    assert!(json["user"]["password_hash"].is_null());
}

/// Wrong password and unknown email return the same generic 401, so the
/// response does not reveal whether the account exists.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: SqlitePool) {
    create_test_user(&pool, "known@example.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "known@example.com", "password": "wrong" });
    let wrong_pw = post_json(app, "/api/users/login", body).await;
    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_json = body_json(wrong_pw).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever" });
    let unknown = post_json(app, "/api/users/login", body).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_json = body_json(unknown).await;

    assert_eq!(wrong_pw_json["error"], "Invalid credentials");
    assert_eq!(wrong_pw_json["error"], unknown_json["error"]);
}

/// Login accepts any email casing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_case_insensitive_email(pool: SqlitePool) {
    let (_user, password) = create_test_user(&pool, "casing@example.com", "user").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "CASING@Example.com", &password).await;
    assert_eq!(json["user"]["email"], "casing@example.com");
}

// ---------------------------------------------------------------------------
// /me tests
// ---------------------------------------------------------------------------

/// GET /api/users/me echoes the token's identity claims.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_token_identity(pool: SqlitePool) {
    let (user, password) = create_test_user(&pool, "me@example.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "me@example.com", &password).await;
    let token = login_json["token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/users/me", token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "me@example.com");
    assert_eq!(json["user"]["role"], "user");
}

/// GET /api/users/me without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No token provided");
}

/// A garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_rejects_invalid_token(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/users/me", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

/// The token is also accepted via the `token` cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_accepts_cookie_token(pool: SqlitePool) {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let (_user, password) = create_test_user(&pool, "cookie@example.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "cookie@example.com", &password).await;
    let token = login_json["token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "cookie@example.com");
}
