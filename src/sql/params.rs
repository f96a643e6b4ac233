//! Cell values bound to and decoded from PostgreSQL statements.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row as _};

/// One cell of a row, or one bound statement parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
}

/// A raw row tuple in column order.
pub type Row = Vec<FieldValue>;

/// Bind params in order, each as its native PostgreSQL type.
pub fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [FieldValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            FieldValue::Null => query.bind(Option::<String>::None),
            FieldValue::Int(n) => query.bind(*n),
            FieldValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

/// Decode every column of a row by position.
pub fn decode_row(row: &PgRow) -> Row {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &PgRow, idx: usize) -> FieldValue {
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(idx) {
        return FieldValue::Int(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(idx) {
        return FieldValue::Int(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(idx) {
        return FieldValue::Int(n);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(idx) {
        return FieldValue::Text(s);
    }
    FieldValue::Null
}
