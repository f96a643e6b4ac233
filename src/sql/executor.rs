//! Statement execution against PostgreSQL: atomic batches for writes, single queries for reads.

use crate::error::AppError;
use crate::sql::builder::Statement;
use crate::sql::params::{bind_params, decode_row, FieldValue, Row};
use async_trait::async_trait;
use sqlx::PgPool;

/// Result of one statement inside a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatementOutcome {
    pub rows_affected: u64,
}

#[async_trait]
pub trait Executor: Send + Sync {
    /// Run all statements in order inside one transaction. Either every statement takes effect
    /// or none does; the first failure rolls back and is returned as `TransactionFailed`.
    /// Failing to obtain a connection or open the transaction is `Internal`.
    async fn run_batch(&self, batch: &[Statement]) -> Result<Vec<StatementOutcome>, AppError>;

    /// Run one auto-committed read and return its rows.
    async fn run_query(&self, sql: &str, params: &[FieldValue]) -> Result<Vec<Row>, AppError>;
}

#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        PgExecutor { pool }
    }
}

#[async_trait]
impl Executor for PgExecutor {
    async fn run_batch(&self, batch: &[Statement]) -> Result<Vec<StatementOutcome>, AppError> {
        // The transaction owns the pooled connection; dropping it returns the connection and
        // rolls back anything not committed. No connection at all is a server fault.
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "could not open transaction");
            AppError::Internal(e.to_string())
        })?;
        let mut outcomes = Vec::with_capacity(batch.len());
        for stmt in batch {
            tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "query (tx)");
            let result = bind_params(sqlx::query(&stmt.sql), &stmt.params)
                .execute(&mut *tx)
                .await;
            match result {
                Ok(done) => {
                    tracing::info!(sql = %stmt.sql, rows_affected = done.rows_affected(), "executed statement");
                    outcomes.push(StatementOutcome {
                        rows_affected: done.rows_affected(),
                    });
                }
                Err(e) => {
                    tracing::error!(sql = %stmt.sql, error = %e, "statement failed");
                    if let Err(rb) = tx.rollback().await {
                        tracing::warn!(error = %rb, "rollback failed");
                    }
                    return Err(AppError::TransactionFailed(e.to_string()));
                }
            }
        }
        tx.commit().await.map_err(|e| {
            tracing::error!(error = %e, "commit failed");
            AppError::TransactionFailed(e.to_string())
        })?;
        Ok(outcomes)
    }

    async fn run_query(&self, sql: &str, params: &[FieldValue]) -> Result<Vec<Row>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "could not acquire connection");
            AppError::QueryFailed(e.to_string())
        })?;
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!(sql = %sql, error = %e, "query failed");
                AppError::QueryFailed(e.to_string())
            })?;
        tracing::info!(sql = %sql, rows = rows.len(), "executed query");
        Ok(rows.iter().map(decode_row).collect())
    }
}
