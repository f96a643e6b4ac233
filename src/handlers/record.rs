//! Record CRUD handlers: validate, call the store, map the outcome to a response.

use crate::error::AppError;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shape = RequestValidator::resolve_shape(&state.registry, &tag)?;
    let records = state.store.list_all(shape).await?;
    Ok(Json(records))
}

pub async fn read(
    State(state): State<AppState>,
    Path((tag, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let shape = RequestValidator::resolve_shape(&state.registry, &tag)?;
    let id = RequestValidator::numeric_id(&id_str)?;
    let record = state
        .store
        .get_by_id(shape, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Json(record))
}

pub async fn create(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let shape = RequestValidator::resolve_shape(&state.registry, &tag)?;
    let body = json_body(body)?;
    let record = RequestValidator::shape_body(shape, Some(&body))?
        .ok_or_else(|| AppError::BadRequest("body required".into()))?;
    tracing::info!(%tag, body = %body, "calling insert");
    let affected = state
        .store
        .insert(&record)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{}/{}", tag, record.id())))?;
    Ok(Json(affected))
}

pub async fn update(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let shape = RequestValidator::resolve_shape(&state.registry, &tag)?;
    let body = json_body(body)?;
    let record = RequestValidator::shape_body(shape, Some(&body))?
        .ok_or_else(|| AppError::BadRequest("body required".into()))?;
    tracing::info!(%tag, body = %body, "calling update");
    let affected = state
        .store
        .update(&record)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{}/{}", tag, record.id())))?;
    Ok(Json(affected))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((tag, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let shape = RequestValidator::resolve_shape(&state.registry, &tag)?;
    let id = RequestValidator::numeric_id(&id_str)?;
    tracing::info!(%tag, id, "calling delete");
    let affected = state
        .store
        .delete(shape, id)
        .await
        .map_err(AppError::into_internal)?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Json(affected))
}
