//! Generic record DAO over any `Executor`.

use crate::error::AppError;
use crate::model::{Record, Shape};
use crate::response::RowsAffected;
use crate::sql::{self, Executor};
use async_trait::async_trait;

/// CRUD operations the dispatcher relies on. Reads report absence as `Ok(None)` / an empty
/// list and failures as `QueryFailed`; writes report zero affected rows as `Ok(None)` and
/// failures as `TransactionFailed`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_all(&self, shape: Shape) -> Result<Vec<Record>, AppError>;
    async fn get_by_id(&self, shape: Shape, id: i64) -> Result<Option<Record>, AppError>;
    async fn insert(&self, record: &Record) -> Result<Option<RowsAffected>, AppError>;
    async fn update(&self, record: &Record) -> Result<Option<RowsAffected>, AppError>;
    async fn delete(&self, shape: Shape, id: i64) -> Result<Option<RowsAffected>, AppError>;
}

/// Stateless facade: every call builds its statements and hands them to the executor.
pub struct RecordDao<E> {
    executor: E,
}

impl<E: Executor> RecordDao<E> {
    pub fn new(executor: E) -> Self {
        RecordDao { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn query(&self, shape: Shape, q: sql::Statement) -> Result<Vec<Record>, AppError> {
        self.executor
            .run_query(&q.sql, &q.params)
            .await?
            .into_iter()
            .map(|row| shape.from_row(row))
            .collect()
    }

    async fn write(&self, q: sql::Statement) -> Result<Option<RowsAffected>, AppError> {
        let outcomes = self.executor.run_batch(std::slice::from_ref(&q)).await?;
        Ok(RowsAffected::reduce(&outcomes))
    }
}

#[async_trait]
impl<E: Executor> RecordStore for RecordDao<E> {
    async fn list_all(&self, shape: Shape) -> Result<Vec<Record>, AppError> {
        self.query(shape, sql::select_all(shape)).await
    }

    async fn get_by_id(&self, shape: Shape, id: i64) -> Result<Option<Record>, AppError> {
        let mut rows = self.query(shape, sql::select_by_id(shape, id)).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    async fn insert(&self, record: &Record) -> Result<Option<RowsAffected>, AppError> {
        tracing::info!(tag = record.shape().tag(), id = record.id(), "insert");
        self.write(sql::insert(record)).await
    }

    async fn update(&self, record: &Record) -> Result<Option<RowsAffected>, AppError> {
        tracing::info!(tag = record.shape().tag(), id = record.id(), "update");
        self.write(sql::update(record)).await
    }

    async fn delete(&self, shape: Shape, id: i64) -> Result<Option<RowsAffected>, AppError> {
        tracing::info!(tag = shape.tag(), id, "delete");
        self.write(sql::delete(shape, id)).await
    }
}
