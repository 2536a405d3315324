//! Trait definitions for statement builders.

use crate::client::Execer;
use crate::config::BuilderConfig;
use crate::error::QbResult;
use crate::qb::expr::Expression;
use crate::qb::param::{Param, params_ref};
use tokio_postgres::types::ToSql;

/// Base trait for all statement builders.
///
/// A builder describes itself as an [`Expression`] tree; finalizing renders
/// that tree with the builder's dialect, numbering placeholders from 1.
pub trait Builder: Sync {
    /// The configuration sampled when the builder was created.
    fn config(&self) -> &BuilderConfig;

    /// Capture the statement as a dialect-neutral expression.
    ///
    /// Identifiers are already quoted; bound values stay as `?` markers so the
    /// result can be nested inside another statement and renumbered there.
    fn to_expr(&self) -> QbResult<Expression>;

    /// Finalize into SQL text and bound arguments.
    fn to_sql(&self) -> QbResult<(String, Vec<Param>)> {
        self.to_expr()?.to_sql(self.config().dialect.as_ref())
    }

    /// Finalize into a [`BuiltQuery`] carrying the interpolation flag.
    fn build(&self) -> QbResult<BuiltQuery> {
        let (sql, params) = self.to_sql()?;
        Ok(BuiltQuery {
            sql,
            params,
            interpolate: self.config().interpolate,
        })
    }

    /// Whether arguments should be inlined by the executor.
    fn is_interpolated(&self) -> bool {
        self.config().interpolate
    }

    /// Finalize and run the statement, returning the affected row count.
    fn exec(
        &self,
        conn: &impl Execer,
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send {
        async move {
            let query = self.build()?;
            tracing::debug!(
                target: "stmtqb.sql",
                sql = %query.sql,
                params = query.params.len(),
                interpolate = query.interpolate,
                "executing statement"
            );
            conn.execute(&query).await
        }
    }
}

/// The result of finalizing a builder.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Param>,
    /// Sampled interpolation flag of the originating builder.
    pub interpolate: bool,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Param>) -> Self {
        Self {
            sql,
            params,
            interpolate: false,
        }
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        params_ref(&self.params)
    }
}
