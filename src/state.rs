//! Shared application state for all routes. Nothing in it is mutated after startup.

use crate::model::ShapeRegistry;
use crate::service::{RecordDao, RecordStore};
use crate::sql::PgExecutor;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ShapeRegistry>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AppState {
            registry: Arc::new(ShapeRegistry::new()),
            store,
        }
    }

    /// State backed by the PostgreSQL DAO.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(Arc::new(RecordDao::new(PgExecutor::new(pool))))
    }
}
