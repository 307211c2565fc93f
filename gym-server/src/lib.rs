//! Gym Server - membership administration backend
//!
//! # Architecture
//!
//! - **Database** (`db`): SQLite gateway (sqlx) with embedded migrations
//! - **Membership** (`membership`): status engine, revenue aggregator, fee windows
//! - **Services** (`services`): status write-back, fee collection, summaries
//! - **Auth** (`auth`): single fixed credential, HTTP Basic
//! - **HTTP API** (`api`): axum routers and handlers
//!
//! ```text
//! gym-server/src/
//! ├── core/          # config, state, server
//! ├── db/            # pool + repositories
//! ├── membership/    # pure engines
//! ├── services/      # orchestration around the engines
//! ├── auth/          # Basic auth middleware
//! ├── api/           # routes and handlers
//! └── utils/         # logger, validation, money
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod membership;
pub mod services;
pub mod utils;

// Re-export core types
pub use auth::{AdminCredential, CurrentUser};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - supports tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and install the global logger
///
/// Must run before [`Config::from_env`] so `.env` values are visible.
pub fn setup_environment() -> Result<(), AppError> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty());

    init_logger_with_file(Some(&log_level), Some(log_json), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______                 ___       __          _
  / ____/_  ______ ___   /   | ____/ /___ ___  (_)___
 / / __/ / / / __ `__ \ / /| |/ __  / __ `__ \/ / __ \
/ /_/ / /_/ / / / / / // ___ / /_/ / / / / / / / / / /
\____/\__, /_/ /_/ /_//_/  |_\__,_/_/ /_/ /_/_/_/ /_/
     /____/
    "#
    );
}
