//! Safe SQL: statement builders, parameter binding, and the transactional executor.

mod builder;
mod executor;
pub mod params;
pub use builder::*;
pub use executor::{Executor, PgExecutor, StatementOutcome};
pub use params::{FieldValue, Row};
