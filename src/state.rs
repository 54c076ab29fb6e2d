use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (None until the background connect finishes)
    pub db: Arc<RwLock<Option<DatabaseConnection>>>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: Option<DatabaseConnection>, config: Config) -> Self {
        Self {
            db: Arc::new(RwLock::new(db)),
            config: Arc::new(config),
        }
    }

    /// Get database connection, returns None while still connecting
    pub async fn get_db(&self) -> Option<DatabaseConnection> {
        self.db.read().await.clone()
    }

    /// Install the database connection once it is ready
    pub async fn set_db(&self, db: DatabaseConnection) {
        *self.db.write().await = Some(db);
    }

    /// Whether the database is available
    pub async fn is_ready(&self) -> bool {
        self.db.read().await.is_some()
    }
}
