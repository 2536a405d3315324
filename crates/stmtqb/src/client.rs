//! Execution boundary for finalized statements.

use crate::error::QbResult;
use crate::qb::BuiltQuery;

/// Something that can run a finalized `(sql, params)` pair.
///
/// The builders never inspect results; they only hand over SQL text and
/// arguments. Implement this for a connection, a transaction or a test double.
pub trait Execer: Send + Sync {
    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        query: &BuiltQuery,
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send;
}

/// tokio-postgres always binds parameters; interpolation is only noted.
///
/// Returns whether a note was emitted.
fn note_interpolation(query: &BuiltQuery) -> bool {
    if query.interpolate {
        tracing::trace!(
            target: "stmtqb",
            sql = %query.sql,
            "interpolation requested; tokio-postgres binds parameters instead"
        );
    }
    query.interpolate
}

impl Execer for tokio_postgres::Client {
    async fn execute(&self, query: &BuiltQuery) -> QbResult<u64> {
        note_interpolation(query);
        let params = query.params_ref();
        Ok(tokio_postgres::Client::execute(self, query.sql.as_str(), &params).await?)
    }
}

impl Execer for tokio_postgres::Transaction<'_> {
    async fn execute(&self, query: &BuiltQuery) -> QbResult<u64> {
        note_interpolation(query);
        let params = query.params_ref();
        Ok(tokio_postgres::Transaction::execute(self, query.sql.as_str(), &params).await?)
    }
}
