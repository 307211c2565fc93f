use crate::utils::AppError;

/// Development-only fallback for `ADMIN_PASSWORD`
const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | ./data/gym.db | SQLite database file |
/// | HTTP_PORT | 8001 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | ADMIN_USERNAME | admin | Basic-auth user |
/// | ADMIN_PASSWORD | (required outside development) | Basic-auth password |
/// | CORS_ORIGINS | * | Comma-separated allow-list, `*` for any |
///
/// Logging variables (`LOG_LEVEL`, `LOG_DIR`, `LOG_JSON`) are read by
/// [`crate::setup_environment`] before the config is loaded.
///
/// ```ignore
/// DATABASE_PATH=/srv/gym/gym.db HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (created if missing)
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Basic-auth username
    pub admin_username: String,
    /// Basic-auth password
    pub admin_password: String,
    /// Raw `CORS_ORIGINS` value
    pub cors_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Used by [`Config::from_env`] and by tests, which must not mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        Ok(Self {
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./data/gym.db".into()),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8001),
            admin_username: lookup("ADMIN_USERNAME")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "admin".into()),
            admin_password: Self::require_secret(&lookup, "ADMIN_PASSWORD", &environment)?,
            cors_origins: lookup("CORS_ORIGINS").unwrap_or_else(|| "*".into()),
            environment,
        })
    }

    /// Require a secret: must be set and non-empty outside development.
    fn require_secret<F>(lookup: &F, name: &str, environment: &str) -> Result<String, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(name) {
            Some(v) if !v.is_empty() => Ok(v),
            _ if environment == "development" => {
                tracing::warn!("{name} not set, using development fallback");
                Ok(DEV_ADMIN_PASSWORD.into())
            }
            Some(_) => Err(AppError::config(format!(
                "{name} must not be empty in {environment} environment"
            ))),
            None => Err(AppError::config(format!(
                "{name} must be set in {environment} environment"
            ))),
        }
    }

    /// Explicit CORS allow-list, or `None` when any origin is allowed
    pub fn cors_allow_list(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
