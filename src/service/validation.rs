//! Request validation run before any store call.

use crate::error::AppError;
use crate::model::{Record, Shape, ShapeRegistry};
use serde_json::Value;
use std::collections::HashSet;

pub struct RequestValidator;

impl RequestValidator {
    /// Resolve a path tag to a shape. Unregistered tags and the numeric sentinel are not found.
    pub fn resolve_shape(registry: &ShapeRegistry, tag: &str) -> Result<Shape, AppError> {
        registry
            .shape(tag)
            .ok_or_else(|| AppError::NotFound(tag.to_string()))
    }

    /// Parse a path id. Must be an integer >= 0.
    pub fn numeric_id(raw: &str) -> Result<i64, AppError> {
        let id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", raw)))?;
        if id < 0 {
            return Err(AppError::BadRequest(format!("id must not be negative: {}", id)));
        }
        Ok(id)
    }

    /// Validate a body against a shape and bind it. An absent body passes through as `None`.
    /// The field set must be non-empty, distinct, and as large as the shape's field list.
    pub fn shape_body(shape: Shape, body: Option<&Value>) -> Result<Option<Record>, AppError> {
        let Some(body) = body else { return Ok(None) };
        let Value::Object(map) = body else {
            return Err(AppError::BadRequest("body must be a JSON object".into()));
        };
        if map.is_empty() {
            return Err(AppError::BadRequest("body is empty".into()));
        }
        let expected = shape.fields().len();
        if map.len() != expected {
            return Err(AppError::BadRequest(format!(
                "{} expects {} fields, got {}",
                shape.tag(),
                expected,
                map.len()
            )));
        }
        let distinct: HashSet<&str> = map.keys().map(String::as_str).collect();
        if distinct.len() != map.len() {
            return Err(AppError::BadRequest("duplicate field names".into()));
        }
        let record = shape.from_body(map)?;
        if record.id() < 0 {
            return Err(AppError::BadRequest(format!(
                "id must not be negative: {}",
                record.id()
            )));
        }
        Ok(Some(record))
    }
}
