//! Integer id allocation.
//!
//! Each table draws ids from its own SurrealDB sequence (`seq_<table>`,
//! defined by the schema). Sequences hand out values without touching a
//! shared counter record, so concurrent inserts never conflict over id
//! allocation. An id consumed by an insert that later fails is not reused.

use surrealdb::{Connection, Surreal};

use crate::error::DbError;

/// Allocate the next id for `table`.
pub(crate) async fn next_id<C: Connection>(db: &Surreal<C>, table: &str) -> Result<i64, DbError> {
    let mut result = db
        .query("RETURN sequence::nextval($sequence)")
        .bind(("sequence", format!("seq_{table}")))
        .await?
        .check()
        .map_err(|e| DbError::Query(e.to_string()))?;

    let next: Option<i64> = result.take(0)?;
    next.ok_or_else(|| DbError::Query(format!("sequence for `{table}` returned no value")))
}
