//! Composable SQL expressions with relative placeholder numbering.
//!
//! An [`Expression`] is a SQL template containing `?` markers plus one
//! argument per marker. An argument is either a bound value or another
//! expression. Rendering walks the tree once, asks the dialect for each
//! placeholder, and threads a single cursor through every level, so the final
//! statement is numbered `$1..$n` with no gaps no matter how deep the nesting.
//!
//! Write `??` for a literal question mark (e.g. the PostgreSQL `jsonb ?` operator).
//!
//! ```ignore
//! use stmtqb::{expr, Expression};
//!
//! let lower = expr!("lower(?)", "BOB@X.COM");
//! let values = expr!("VALUES (?, ?)", "Bob", lower);
//! // renders as: VALUES ($1, lower($2))
//! ```

use crate::dialect::Dialect;
use crate::error::{QbError, QbResult};
use crate::qb::param::Param;
use crate::qb::traits::Builder;
use std::borrow::Cow;
use tokio_postgres::types::ToSql;

/// Build an [`Expression`] from a template and trailing arguments.
///
/// Each argument goes through [`IntoArg`]: plain values are bound, nested
/// expressions are rendered in place.
#[macro_export]
macro_rules! expr {
    ($sql:expr $(, $arg:expr)* $(,)?) => {
        $crate::qb::Expression::new($sql, vec![$($crate::qb::IntoArg::into_arg($arg)),*])
    };
}

/// One argument of an expression: a bound value or a nested expression.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Bound parameter, rendered as a dialect placeholder.
    Value(Param),
    /// Nested expression, rendered in place of its marker.
    Expr(Expression),
}

/// Conversion into an expression argument.
pub trait IntoArg {
    fn into_arg(self) -> Arg;
}

impl<T: ToSql + Send + Sync + 'static> IntoArg for T {
    fn into_arg(self) -> Arg {
        Arg::Value(Param::new(self))
    }
}

impl IntoArg for Param {
    fn into_arg(self) -> Arg {
        Arg::Value(self)
    }
}

impl IntoArg for Expression {
    fn into_arg(self) -> Arg {
        Arg::Expr(self)
    }
}

impl IntoArg for Arg {
    fn into_arg(self) -> Arg {
        self
    }
}

/// An immutable SQL fragment with its arguments.
#[derive(Clone, Debug, Default)]
pub struct Expression {
    sql: String,
    args: Vec<Arg>,
}

impl Expression {
    /// Create an expression from a `?` template and its arguments.
    ///
    /// Marker and argument counts are checked when the expression is rendered.
    /// Use [`Expression::try_new`] to check them up front.
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Create an expression and verify the marker count against `args`.
    pub fn try_new(sql: impl Into<String>, args: Vec<Arg>) -> QbResult<Self> {
        let expr = Self::new(sql, args);
        expr.check_arity()?;
        Ok(expr)
    }

    /// Create an expression whose arguments are all bound values.
    ///
    /// # Example
    /// ```ignore
    /// Expression::values("VALUES (?, ?)", vec!["Bob", "bob@x.com"])
    /// ```
    pub fn values<I: IntoArg>(sql: impl Into<String>, values: impl IntoIterator<Item = I>) -> Self {
        Self::new(sql, values.into_iter().map(IntoArg::into_arg).collect())
    }

    /// Capture another builder's statement as an expression.
    pub fn from_builder(builder: &impl Builder) -> QbResult<Self> {
        builder.to_expr()
    }

    /// Literal SQL without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// The source template.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Direct arguments of this node.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// True for an empty template with no arguments.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.args.is_empty()
    }

    /// Number of bound values in the whole subtree.
    pub fn placeholder_count(&self) -> usize {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Value(_) => 1,
                Arg::Expr(nested) => nested.placeholder_count(),
            })
            .sum()
    }

    /// Check marker/argument counts for this node and every nested node.
    pub fn validate(&self) -> QbResult<()> {
        self.check_arity()?;
        for arg in &self.args {
            if let Arg::Expr(nested) = arg {
                nested.validate()?;
            }
        }
        Ok(())
    }

    fn check_arity(&self) -> QbResult<()> {
        let markers = count_markers(&self.sql);
        if markers != self.args.len() {
            return Err(QbError::mismatch(&self.sql, markers, self.args.len()));
        }
        Ok(())
    }

    /// Render into `buf`, numbering placeholders from `*pos`.
    ///
    /// Every bound value is pushed onto `args` and advances `pos` by one.
    /// Nested expressions share the same `buf`, `args` and `pos`.
    pub fn write_relative(
        &self,
        buf: &mut String,
        args: &mut Vec<Param>,
        pos: &mut usize,
        dialect: &dyn Dialect,
    ) -> QbResult<()> {
        self.check_arity()?;

        let mut pending = self.args.iter();
        let mut rest = self.sql.as_str();
        while let Some(idx) = rest.find('?') {
            buf.push_str(&rest[..idx]);
            rest = &rest[idx + 1..];

            if let Some(after) = rest.strip_prefix('?') {
                buf.push('?');
                rest = after;
                continue;
            }

            match pending.next() {
                Some(Arg::Value(param)) => {
                    dialect.write_placeholder(buf, *pos);
                    args.push(param.clone());
                    *pos += 1;
                }
                Some(Arg::Expr(nested)) => nested.write_relative(buf, args, pos, dialect)?,
                None => {
                    return Err(QbError::mismatch(
                        &self.sql,
                        count_markers(&self.sql),
                        self.args.len(),
                    ));
                }
            }
        }
        buf.push_str(rest);
        Ok(())
    }

    /// Render as a standalone statement with placeholders starting at 1.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> QbResult<(String, Vec<Param>)> {
        let mut buf = String::with_capacity(self.sql.len() + 8);
        let mut args = Vec::with_capacity(self.args.len());
        let mut pos = 1;
        self.write_relative(&mut buf, &mut args, &mut pos, dialect)?;
        Ok((buf, args))
    }
}

impl From<&str> for Expression {
    fn from(sql: &str) -> Self {
        Expression::raw(sql)
    }
}

impl From<String> for Expression {
    fn from(sql: String) -> Self {
        Expression::raw(sql)
    }
}

/// Count `?` markers, skipping `??` escapes.
pub(crate) fn count_markers(sql: &str) -> usize {
    let mut count = 0;
    let mut rest = sql;
    while let Some(idx) = rest.find('?') {
        rest = &rest[idx + 1..];
        if let Some(after) = rest.strip_prefix('?') {
            rest = after;
        } else {
            count += 1;
        }
    }
    count
}

/// Escape literal text so it can be embedded in a template.
pub(crate) fn escape_markers(text: &str) -> Cow<'_, str> {
    if text.contains('?') {
        Cow::Owned(text.replace('?', "??"))
    } else {
        Cow::Borrowed(text)
    }
}
