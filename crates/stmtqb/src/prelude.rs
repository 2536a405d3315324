//! Convenient imports for typical `stmtqb` usage.
//!
//! ```ignore
//! use stmtqb::prelude::*;
//! ```

pub use crate::{
    Builder, BuilderConfig, BuiltQuery, Execer, Expression, InsertQueryBuilder, QbError,
    QbResult, QuerySource, SelectBuilder, expr, qb,
};
