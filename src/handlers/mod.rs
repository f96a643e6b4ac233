//! HTTP handlers for record CRUD.

pub mod record;
pub use record::*;
