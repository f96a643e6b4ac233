//! Type tag resolution. Built once at startup, read-only afterwards.

use crate::model::shape::Shape;
use std::collections::HashMap;

/// Tag accepted by the validator for plain numeric id checks. Has no shape.
pub const NUMBER_TAG: &str = "number";

/// What a type tag resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Shape(Shape),
    Number,
}

#[derive(Clone, Debug)]
pub struct ShapeRegistry {
    by_tag: HashMap<&'static str, Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        ShapeRegistry {
            by_tag: Shape::ALL.iter().map(|s| (s.tag(), *s)).collect(),
        }
    }

    pub fn resolve(&self, tag: &str) -> Option<TypeTag> {
        if tag == NUMBER_TAG {
            return Some(TypeTag::Number);
        }
        self.by_tag.get(tag).copied().map(TypeTag::Shape)
    }

    /// Shape for a tag; `None` for unregistered tags and for the numeric sentinel.
    pub fn shape(&self, tag: &str) -> Option<Shape> {
        match self.resolve(tag)? {
            TypeTag::Shape(s) => Some(s),
            TypeTag::Number => None,
        }
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
