//! INSERT statement builder.

use crate::config::BuilderConfig;
use crate::error::{QbError, QbResult};
use crate::qb::expr::{Arg, Expression, IntoArg, escape_markers};
use crate::qb::param::Param;
use crate::qb::traits::Builder;

/// Where the value/query clause of an INSERT comes from.
#[derive(Clone, Debug)]
pub enum QuerySource {
    /// Raw SQL with `?` markers and its arguments, e.g. `VALUES (?, ?)`.
    Raw(Expression),
    /// Another builder captured at the time it was passed in.
    SubBuilder(Expression),
}

impl QuerySource {
    /// Capture another builder's statement, e.g. a SELECT for `INSERT ... SELECT`.
    ///
    /// The sub-builder is finalized immediately, so its own configuration
    /// errors surface here rather than when the outer statement is built.
    /// Its identifiers keep the sub-builder's own dialect quoting; only the
    /// placeholders are written by the outer builder's dialect.
    pub fn builder(builder: &impl Builder) -> QbResult<Self> {
        Ok(QuerySource::SubBuilder(Expression::from_builder(builder)?))
    }

    fn into_expr(self) -> Expression {
        match self {
            QuerySource::Raw(expr) | QuerySource::SubBuilder(expr) => expr,
        }
    }
}

impl From<Expression> for QuerySource {
    fn from(expr: Expression) -> Self {
        QuerySource::Raw(expr)
    }
}

impl From<&str> for QuerySource {
    fn from(sql: &str) -> Self {
        QuerySource::Raw(Expression::raw(sql))
    }
}

impl From<String> for QuerySource {
    fn from(sql: String) -> Self {
        QuerySource::Raw(Expression::raw(sql))
    }
}

/// INSERT builder: `INSERT INTO table (cols) <query> [RETURNING cols]`.
#[derive(Clone, Debug)]
pub struct InsertQueryBuilder {
    /// Table name
    table: String,
    /// Column names
    columns: Vec<String>,
    /// Value/query clause
    query: Option<Expression>,
    /// RETURNING columns
    returning: Vec<String>,
    /// Dialect and interpolation flag, fixed at construction
    config: BuilderConfig,
}

impl InsertQueryBuilder {
    /// Create an INSERT builder using the process-wide defaults.
    ///
    /// An empty table name is logged and rejected with [`QbError::EmptyTable`].
    pub fn new(table: &str) -> QbResult<Self> {
        Self::with_config(table, BuilderConfig::current())
    }

    /// Create an INSERT builder with an explicit configuration.
    pub fn with_config(table: &str, config: BuilderConfig) -> QbResult<Self> {
        if table.is_empty() {
            tracing::error!(target: "stmtqb", "InsertInto requires a table name");
            return Err(QbError::EmptyTable);
        }
        Ok(Self {
            table: table.to_string(),
            columns: Vec::new(),
            query: None,
            returning: Vec::new(),
            config,
        })
    }

    /// Set the insert columns, replacing any previous list.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Set the value/query clause from raw SQL, an expression, or a sub-builder.
    ///
    /// # Example
    /// ```ignore
    /// let qb = InsertQueryBuilder::new("people")?
    ///     .columns(&["name", "email"])
    ///     .query(expr!("VALUES (?, ?)", "Bob", "bob@x.com"));
    ///
    /// let archive = InsertQueryBuilder::new("people_archive")?
    ///     .columns(&["name", "email"])
    ///     .query(QuerySource::builder(&select)?);
    /// ```
    pub fn query(mut self, source: impl Into<QuerySource>) -> Self {
        self.query = Some(source.into().into_expr());
        self
    }

    /// Set the value/query clause from a `?` template and bound values.
    pub fn query_raw<I: IntoArg>(
        self,
        sql: &str,
        values: impl IntoIterator<Item = I>,
    ) -> Self {
        self.query(Expression::values(sql, values))
    }

    /// Set RETURNING columns, replacing any previous list. Empty means none.
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Table name as given at construction.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn checked_query(&self) -> QbResult<&Expression> {
        if self.table.is_empty() {
            return Err(QbError::EmptyTable);
        }
        if self.columns.is_empty() {
            return Err(QbError::NoColumns);
        }
        self.query.as_ref().ok_or(QbError::NoQuery)
    }

    /// `INSERT INTO <table> (<cols>) `
    fn write_head(&self, sql: &mut String) -> QbResult<()> {
        let dialect = self.config.dialect.as_ref();
        sql.push_str("INSERT INTO ");
        dialect.write_identifier(sql, &self.table)?;
        sql.push_str(" (");
        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            dialect.write_identifier(sql, c)?;
        }
        sql.push_str(") ");
        Ok(())
    }

    /// ` RETURNING <cols>`, or nothing
    fn write_returning(&self, sql: &mut String) -> QbResult<()> {
        let dialect = self.config.dialect.as_ref();
        for (i, c) in self.returning.iter().enumerate() {
            if i == 0 {
                sql.push_str(" RETURNING ");
            } else {
                sql.push(',');
            }
            dialect.write_identifier(sql, c)?;
        }
        Ok(())
    }
}

impl Builder for InsertQueryBuilder {
    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn to_expr(&self) -> QbResult<Expression> {
        let query = self.checked_query()?;
        query.validate()?;

        let mut head = String::new();
        self.write_head(&mut head)?;
        let mut tail = String::new();
        self.write_returning(&mut tail)?;

        let template = format!("{}?{}", escape_markers(&head), escape_markers(&tail));
        Ok(Expression::new(template, vec![Arg::Expr(query.clone())]))
    }

    fn to_sql(&self) -> QbResult<(String, Vec<Param>)> {
        let query = self.checked_query()?;

        let mut sql = String::with_capacity(64 + query.sql().len());
        let mut args = Vec::with_capacity(query.placeholder_count());
        let mut pos = 1;

        self.write_head(&mut sql)?;
        query.write_relative(&mut sql, &mut args, &mut pos, self.config.dialect.as_ref())?;
        self.write_returning(&mut sql)?;

        Ok((sql, args))
    }
}
