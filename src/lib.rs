//! Shape REST: CRUD over PostgreSQL tables for a fixed set of record shapes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{LogFormat, Settings};
pub use error::{AppError, ConfigError};
pub use model::{Record, Shape, ShapeRegistry, TypeTag};
pub use response::RowsAffected;
pub use routes::{build_router, common_routes, record_routes};
pub use service::{RecordDao, RecordStore, RequestValidator};
pub use sql::{Executor, PgExecutor};
pub use state::AppState;
