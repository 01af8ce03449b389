//! Middleware: authentication extractors, role checks, rate limiting, and
//! security headers.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated user from a bearer
//!   token (header or cookie).
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rate_limit`] -- per-IP request budgets.
//! - [`security_headers`] -- static response hardening headers.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
pub mod security_headers;
