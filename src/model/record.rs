//! Record instances for each shape.

use crate::model::shape::Shape;
use crate::sql::FieldValue;
use serde::{Deserialize, Serialize};

/// Row of the `things` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thing {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub weight: i64,
}

/// Row of the `wings` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Wing {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

/// A record of any registered shape. Serializes as its bare field object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Thing(Thing),
    Wing(Wing),
}

impl Record {
    pub fn shape(&self) -> Shape {
        match self {
            Record::Thing(_) => Shape::Things,
            Record::Wing(_) => Shape::Wings,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Thing(t) => t.id,
            Record::Wing(w) => w.id,
        }
    }

    /// Field values in the shape's declared order.
    pub fn values(&self) -> Vec<FieldValue> {
        match self {
            Record::Thing(t) => vec![
                FieldValue::Int(t.id),
                FieldValue::Text(t.name.clone()),
                FieldValue::Int(t.size),
                FieldValue::Int(t.weight),
            ],
            Record::Wing(w) => vec![
                FieldValue::Int(w.id),
                FieldValue::Text(w.name.clone()),
                FieldValue::Text(w.r#type.clone()),
            ],
        }
    }
}
