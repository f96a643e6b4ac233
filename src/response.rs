//! Response payloads shared by the handlers.

use crate::sql::StatementOutcome;
use serde::Serialize;

/// Total rows touched by a write. Only ever built with a non-zero count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsAffected {
    pub rows_affected: u64,
}

impl RowsAffected {
    /// Sum rows affected over a batch; `None` when nothing was touched.
    pub fn reduce(outcomes: &[StatementOutcome]) -> Option<RowsAffected> {
        let rows_affected: u64 = outcomes.iter().map(|o| o.rows_affected).sum();
        (rows_affected > 0).then_some(RowsAffected { rows_affected })
    }
}

pub fn error_body(message: String) -> serde_json::Value {
    serde_json::json!({ "error": message })
}
