use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// No entity data lives here; the relational store owns both entity sets and
/// handlers hold nothing beyond the lifetime of a single request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: jobboard_db::DbPool,
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
