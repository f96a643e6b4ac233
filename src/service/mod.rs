//! Record DAO and request validation.

mod dao;
mod validation;
pub use dao::{RecordDao, RecordStore};
pub use validation::RequestValidator;
