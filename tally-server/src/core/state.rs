use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Server state — shared references to every service
///
/// Cloning is cheap: the database handle and JWT service are shared.
///
/// # Components
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded database |
/// | jwt_service | Arc<JwtService> | JWT verification |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT verification service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Create server state from already-built parts
    ///
    /// Usually [`ServerState::initialize`] is used instead
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize server state
    ///
    /// Order:
    /// 1. working directory layout
    /// 2. embedded database (work_dir/database/tally.db)
    /// 3. JWT service
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("tally.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db_service.db, jwt_service)
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
