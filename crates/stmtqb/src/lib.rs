//! # stmtqb
//!
//! A small SQL statement builder that turns composable expressions into
//! dialect-correct SQL text plus a positional argument list.
//!
//! ## Features
//!
//! - **Relative placeholders**: nested expressions are renumbered with one
//!   shared cursor, so `$1..$n` is always contiguous
//! - **Dialects**: PostgreSQL (`$n`), SQLite and MySQL (`?`) placeholder and
//!   identifier quoting rules
//! - **Explicit configuration**: dialect and interpolation flag are sampled
//!   once when a builder is created
//! - **Execution boundary**: finished statements are handed to an [`Execer`]
//!
//! ## Example
//!
//! ```ignore
//! use stmtqb::prelude::*;
//!
//! let (sql, args) = qb::insert_into("people")?
//!     .columns(&["name", "email"])
//!     .query(expr!("VALUES (?, ?)", "Bob", "bob@x.com"))
//!     .returning(&["id"])
//!     .to_sql()?;
//!
//! assert_eq!(sql, "INSERT INTO people (name,email) VALUES ($1, $2) RETURNING id");
//! ```

pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
mod ident;
pub mod prelude;
pub mod qb;

pub use client::Execer;
pub use config::BuilderConfig;
pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::{QbError, QbResult};

// Re-export qb types for easy access
pub use qb::{
    Arg, Builder, BuiltQuery, Expression, InsertQueryBuilder, IntoArg, Param, QuerySource,
    SelectBuilder, insert_into, select,
};
