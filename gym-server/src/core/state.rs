use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AdminCredential;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state - shared by every handler
///
/// Cheap to clone: the pool and credential are reference-counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | Database service (pool owner) |
/// | credential | Admin credential checked by the auth middleware |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub credential: Arc<AdminCredential>,
}

impl ServerState {
    /// Build state from already-opened parts
    pub fn new(config: Config, db: DbService) -> Self {
        let credential = Arc::new(AdminCredential::new(
            &config.admin_username,
            &config.admin_password,
        ));
        Self {
            config,
            db,
            credential,
        }
    }

    /// Open the database named by the config and build the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
