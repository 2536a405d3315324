//! Statement builders on top of the expression layer.
//!
//! # Features
//!
//! - **Relative placeholders**: nested expressions share one cursor, so a
//!   statement is always numbered `$1..$n` without gaps
//! - **Dialect-driven**: identifiers and placeholders are written by the
//!   builder's [`Dialect`](crate::dialect::Dialect)
//! - **Arc-based parameters**: clone-friendly builders and expressions
//! - **Sub-builders**: any builder can be captured as an expression and nested
//!
//! # Usage
//!
//! ```ignore
//! use stmtqb::{expr, qb};
//! use stmtqb::qb::{Builder, QuerySource};
//!
//! let (sql, args) = qb::insert_into("people")?
//!     .columns(&["name", "email"])
//!     .query(expr!("VALUES (?, ?)", "Bob", "bob@x.com"))
//!     .returning(&["id"])
//!     .to_sql()?;
//! // INSERT INTO people (name,email) VALUES ($1, $2) RETURNING id
//!
//! let active = qb::select(&["name", "email"])
//!     .from("people")
//!     .where_(expr!("status = ?", "active"));
//! let copy = qb::insert_into("people_archive")?
//!     .columns(&["name", "email"])
//!     .query(QuerySource::builder(&active)?);
//! ```

mod expr;
mod insert;
mod param;
mod select;
mod traits;

pub use expr::{Arg, Expression, IntoArg};
pub use insert::{InsertQueryBuilder, QuerySource};
pub use param::{Param, params_ref};
pub use select::SelectBuilder;
pub use traits::{Builder, BuiltQuery};

use crate::error::QbResult;

/// Create an INSERT builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = stmtqb::qb::insert_into("people")?.columns(&["name"]);
/// ```
pub fn insert_into(table: &str) -> QbResult<InsertQueryBuilder> {
    InsertQueryBuilder::new(table)
}

/// Create a SELECT builder for the given columns.
pub fn select(cols: &[&str]) -> SelectBuilder {
    SelectBuilder::new(cols)
}
