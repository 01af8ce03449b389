use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding the built frontend bundle (default: `dist`).
    pub static_dir: String,
    /// General per-IP request budget per minute (default: `300`).
    pub rate_limit_per_minute: u32,
    /// Stricter per-IP budget for mutating job requests (default: `30`).
    pub mutation_rate_limit_per_minute: u32,
    /// Directory receiving periodic database backups (default: `db/db_backup`).
    pub backup_dir: String,
    /// Seconds between backup runs (default: `3600`; `0` disables the task).
    pub backup_interval_secs: u64,
    /// How many timestamped backup copies to retain (default: `5`).
    pub backup_keep: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default         |
    /// |--------------------------------|-----------------|
    /// | `HOST`                         | `0.0.0.0`       |
    /// | `PORT`                         | `3000`          |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`            |
    /// | `STATIC_DIR`                   | `dist`          |
    /// | `RATE_LIMIT_PER_MINUTE`        | `300`           |
    /// | `MUTATION_RATE_LIMIT_PER_MINUTE` | `30`          |
    /// | `BACKUP_DIR`                   | `db/db_backup`  |
    /// | `BACKUP_INTERVAL_SECS`         | `3600`          |
    /// | `BACKUP_KEEP`                  | `5`             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".into());

        let rate_limit_per_minute: u32 = std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("RATE_LIMIT_PER_MINUTE must be a valid u32");

        let mutation_rate_limit_per_minute: u32 =
            std::env::var("MUTATION_RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("MUTATION_RATE_LIMIT_PER_MINUTE must be a valid u32");

        let backup_dir = std::env::var("BACKUP_DIR").unwrap_or_else(|_| "db/db_backup".into());

        let backup_interval_secs: u64 = std::env::var("BACKUP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("BACKUP_INTERVAL_SECS must be a valid u64");

        let backup_keep: usize = std::env::var("BACKUP_KEEP")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("BACKUP_KEEP must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            rate_limit_per_minute,
            mutation_rate_limit_per_minute,
            backup_dir,
            backup_interval_secs,
            backup_keep,
            jwt,
        }
    }
}
