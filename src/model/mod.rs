//! Record shapes, record instances, and the tag registry.

mod record;
mod registry;
mod shape;

pub use record::{Record, Thing, Wing};
pub use registry::{ShapeRegistry, TypeTag, NUMBER_TAG};
pub use shape::{FieldDef, FieldKind, Shape};
