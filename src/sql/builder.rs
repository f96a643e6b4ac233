//! Builds the parameterized SELECT, INSERT, UPDATE, DELETE statements for a shape.
//! Identifiers come from the shape registry only; values are always bound.

use crate::model::{Record, Shape};
use crate::sql::params::FieldValue;

/// One SQL statement with its positional parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<FieldValue>) -> Self {
        Statement {
            sql: sql.into(),
            params,
        }
    }
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Declared columns in field order, so rows decode positionally whatever the physical layout.
fn column_list(shape: Shape) -> String {
    shape
        .fields()
        .iter()
        .map(|f| quoted(f.name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn select_all(shape: Shape) -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            column_list(shape),
            quoted(shape.table()),
            quoted("id")
        ),
        Vec::new(),
    )
}

pub fn select_by_id(shape: Shape, id: i64) -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            column_list(shape),
            quoted(shape.table()),
            quoted("id")
        ),
        vec![FieldValue::Int(id)],
    )
}

/// INSERT with one placeholder per declared field; params follow declared order.
pub fn insert(record: &Record) -> Statement {
    let shape = record.shape();
    let placeholders = (1..=shape.fields().len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");
    Statement::new(
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted(shape.table()),
            column_list(shape),
            placeholders
        ),
        record.values(),
    )
}

/// Full replace by id. `id` sits in the SET list too and shares the WHERE placeholder.
pub fn update(record: &Record) -> Statement {
    let shape = record.shape();
    let sets = shape
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = ${}", quoted(f.name), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let id_param = shape
        .fields()
        .iter()
        .position(|f| f.name == "id")
        .map(|i| i + 1)
        .unwrap_or(1);
    Statement::new(
        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            quoted(shape.table()),
            sets,
            quoted("id"),
            id_param
        ),
        record.values(),
    )
}

pub fn delete(shape: Shape, id: i64) -> Statement {
    Statement::new(
        format!("DELETE FROM {} WHERE {} = $1", quoted(shape.table()), quoted("id")),
        vec![FieldValue::Int(id)],
    )
}
