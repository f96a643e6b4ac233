//! Record shapes: the closed set of tables this service exposes, with their ordered fields.

use crate::error::AppError;
use crate::model::record::{Record, Thing, Wing};
use crate::sql::{FieldValue, Row};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef { name, kind }
}

const THING_FIELDS: &[FieldDef] = &[
    field("id", FieldKind::Integer),
    field("name", FieldKind::Text),
    field("size", FieldKind::Integer),
    field("weight", FieldKind::Integer),
];

const WING_FIELDS: &[FieldDef] = &[
    field("id", FieldKind::Integer),
    field("name", FieldKind::Text),
    field("type", FieldKind::Text),
];

/// A registered record shape. Each shape is backed by one table named after its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Things,
    Wings,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Things, Shape::Wings];

    /// Type tag used in request paths. Also the table name.
    pub fn tag(self) -> &'static str {
        match self {
            Shape::Things => "things",
            Shape::Wings => "wings",
        }
    }

    pub fn table(self) -> &'static str {
        self.tag()
    }

    /// Declared fields. Order is the column order used for positional row mapping.
    pub fn fields(self) -> &'static [FieldDef] {
        match self {
            Shape::Things => THING_FIELDS,
            Shape::Wings => WING_FIELDS,
        }
    }

    /// Build a record from a raw row tuple, mapping cells to fields by position.
    pub fn from_row(self, row: Row) -> Result<Record, AppError> {
        if row.len() != self.fields().len() {
            return Err(AppError::QueryFailed(format!(
                "{}: expected {} columns, got {}",
                self.tag(),
                self.fields().len(),
                row.len()
            )));
        }
        let mut cells = Cells {
            shape: self,
            fields: self.fields().iter(),
            values: row.into_iter(),
        };
        Ok(match self {
            Shape::Things => Record::Thing(Thing {
                id: cells.int()?,
                name: cells.text()?,
                size: cells.int()?,
                weight: cells.int()?,
            }),
            Shape::Wings => Record::Wing(Wing {
                id: cells.int()?,
                name: cells.text()?,
                r#type: cells.text()?,
            }),
        })
    }

    /// Build a record from a request body, binding each declared field by name.
    /// Body key order is irrelevant; unknown, missing or mistyped fields are rejected.
    pub fn from_body(self, body: &Map<String, Value>) -> Result<Record, AppError> {
        let value = Value::Object(body.clone());
        let record = match self {
            Shape::Things => serde_json::from_value(value).map(Record::Thing),
            Shape::Wings => serde_json::from_value(value).map(Record::Wing),
        };
        record.map_err(|e| AppError::BadRequest(format!("{}: {}", self.tag(), e)))
    }
}

/// Positional cursor over one row, checked against the declared field kinds.
struct Cells {
    shape: Shape,
    fields: std::slice::Iter<'static, FieldDef>,
    values: std::vec::IntoIter<FieldValue>,
}

impl Cells {
    fn next(&mut self) -> Result<(&'static FieldDef, FieldValue), AppError> {
        match (self.fields.next(), self.values.next()) {
            (Some(f), Some(v)) => Ok((f, v)),
            _ => Err(AppError::QueryFailed(format!("{}: row ended early", self.shape.tag()))),
        }
    }

    fn int(&mut self) -> Result<i64, AppError> {
        match self.next()? {
            (_, FieldValue::Int(n)) => Ok(n),
            (f, other) => Err(mismatch(self.shape, f, &other)),
        }
    }

    fn text(&mut self) -> Result<String, AppError> {
        match self.next()? {
            (_, FieldValue::Text(s)) => Ok(s),
            (f, other) => Err(mismatch(self.shape, f, &other)),
        }
    }
}

fn mismatch(shape: Shape, field: &FieldDef, got: &FieldValue) -> AppError {
    AppError::QueryFailed(format!(
        "{}.{}: expected {:?}, got {:?}",
        shape.tag(),
        field.name,
        field.kind,
        got
    ))
}
