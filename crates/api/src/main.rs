use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobboard_api::auth::password::hash_password;
use jobboard_api::background;
use jobboard_api::config::ServerConfig;
use jobboard_api::router::build_app_router;
use jobboard_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db/database.db".into());

    if let Some(parent) = database_file_path(&database_url).and_then(|p| p.parent().map(PathBuf::from))
    {
        std::fs::create_dir_all(&parent).expect("Failed to create database directory");
    }

    let pool = jobboard_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    jobboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    jobboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Seed data ---
    let admin_hash = hash_password("admin").expect("Failed to hash seed password");
    let user_hash = hash_password("testuser").expect("Failed to hash seed password");
    jobboard_db::seed::seed_if_empty(&pool, &admin_hash, &user_hash)
        .await
        .expect("Failed to seed database");
    tracing::info!("Seed data ensured");

    // --- Backup task ---
    let backup_cancel = tokio_util::sync::CancellationToken::new();
    let backup_handle = match (config.backup_interval_secs, database_file_path(&database_url)) {
        (0, _) => {
            tracing::info!("Database backup task disabled (BACKUP_INTERVAL_SECS=0)");
            None
        }
        (_, None) => {
            tracing::warn!("Database backup task disabled (non-file database)");
            None
        }
        (secs, Some(db_path)) => Some(tokio::spawn(background::backup::run(
            pool.clone(),
            db_path,
            PathBuf::from(config.backup_dir.clone()),
            Duration::from_secs(secs),
            config.backup_keep,
            backup_cancel.clone(),
        ))),
    };

    // --- App state & router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(handle) = backup_handle {
        backup_cancel.cancel();
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Backup task stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Extract the on-disk file path from a SQLite database URL.
///
/// Returns `None` for in-memory databases, which have no file to back up.
fn database_file_path(database_url: &str) -> Option<PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    // Strip query parameters like `?mode=rwc`.
    let path = path.split('?').next().unwrap_or(path);
    Some(PathBuf::from(path))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
