//! SELECT statement builder, mainly used as a sub-query for `INSERT ... SELECT`.

use crate::config::BuilderConfig;
use crate::error::{QbError, QbResult};
use crate::qb::expr::{Arg, Expression, escape_markers};
use crate::qb::traits::Builder;

/// SELECT builder: `SELECT cols FROM table [WHERE ...] [ORDER BY ...] [LIMIT n] [OFFSET n]`.
#[derive(Clone, Debug)]
pub struct SelectBuilder {
    /// SELECT columns (default ["*"])
    columns: Vec<String>,
    /// FROM table
    from: String,
    /// WHERE conditions, ANDed together
    wheres: Vec<Expression>,
    /// ORDER BY clauses (raw SQL)
    order_by: Vec<String>,
    /// LIMIT
    limit: Option<u64>,
    /// OFFSET
    offset: Option<u64>,
    config: BuilderConfig,
}

impl SelectBuilder {
    /// Create a SELECT builder using the process-wide defaults.
    ///
    /// An empty column list selects `*`.
    pub fn new(cols: &[&str]) -> Self {
        Self::with_config(cols, BuilderConfig::current())
    }

    /// Create a SELECT builder with an explicit configuration.
    pub fn with_config(cols: &[&str], config: BuilderConfig) -> Self {
        let columns = if cols.is_empty() {
            vec!["*".to_string()]
        } else {
            cols.iter().map(|c| c.to_string()).collect()
        };
        Self {
            columns,
            from: String::new(),
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            config,
        }
    }

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        self.from = table.to_string();
        self
    }

    /// Add a WHERE condition. Multiple conditions are ANDed.
    ///
    /// # Example
    /// ```ignore
    /// let q = select(&["name", "email"])
    ///     .from("people")
    ///     .where_(expr!("age > ?", 18i32))
    ///     .where_(expr!("status = ?", "active"));
    /// ```
    pub fn where_(mut self, condition: impl Into<Expression>) -> Self {
        self.wheres.push(condition.into());
        self
    }

    /// Add an ORDER BY clause (raw SQL, e.g. `"created_at DESC"`).
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_by.push(clause.to_string());
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl Builder for SelectBuilder {
    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn to_expr(&self) -> QbResult<Expression> {
        if self.from.is_empty() {
            return Err(QbError::EmptyTable);
        }
        let dialect = self.config.dialect.as_ref();

        let mut head = String::from("SELECT ");
        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                head.push(',');
            }
            dialect.write_identifier(&mut head, c)?;
        }
        head.push_str(" FROM ");
        dialect.write_identifier(&mut head, &self.from)?;

        let mut template = escape_markers(&head).into_owned();
        let mut args = Vec::with_capacity(self.wheres.len());

        let conditions: Vec<&Expression> = self.wheres.iter().filter(|w| !w.is_empty()).collect();
        for (i, cond) in conditions.iter().enumerate() {
            cond.validate()?;
            template.push_str(if i == 0 { " WHERE (?)" } else { " AND (?)" });
            args.push(Arg::Expr((*cond).clone()));
        }

        if !self.order_by.is_empty() {
            template.push_str(" ORDER BY ");
            template.push_str(&escape_markers(&self.order_by.join(", ")));
        }
        if let Some(limit) = self.limit {
            template.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            template.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(Expression::new(template, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Sqlite;
    use crate::expr;

    fn pg(cols: &[&str]) -> SelectBuilder {
        SelectBuilder::with_config(cols, BuilderConfig::new())
    }

    #[test]
    fn test_select_basic() {
        let (sql, args) = pg(&[]).from("users").to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM users");
        assert!(args.is_empty());
    }

    #[test]
    fn test_select_with_conditions() {
        let q = pg(&["name", "email"])
            .from("people")
            .where_(expr!("age > ?", 18i32))
            .where_(expr!("status = ? OR status = ?", "active", "pending"))
            .order_by("created_at DESC")
            .limit(10)
            .offset(20);
        let (sql, args) = q.to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT name,email FROM people WHERE (age > $1) AND (status = $2 OR status = $3) \
             ORDER BY created_at DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(format!("{args:?}"), r#"[18, "active", "pending"]"#);
    }

    #[test]
    fn test_select_quotes_identifiers() {
        let (sql, _) = pg(&["order", "u.*"]).from("Users").to_sql().unwrap();
        assert_eq!(sql, r#"SELECT "order",u.* FROM "Users""#);
    }

    #[test]
    fn test_select_raw_where() {
        let (sql, args) = pg(&[]).from("t").where_("deleted_at IS NULL").to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE (deleted_at IS NULL)");
        assert!(args.is_empty());
    }

    #[test]
    fn test_select_positional_dialect() {
        let q = SelectBuilder::with_config(&["id"], BuilderConfig::new().dialect(Sqlite))
            .from("t")
            .where_(expr!("a = ? AND b = ?", 1i32, 2i32));
        let (sql, args) = q.to_sql().unwrap();
        assert_eq!(sql, "SELECT id FROM t WHERE (a = ? AND b = ?)");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_select_without_from_fails() {
        assert!(matches!(pg(&["id"]).to_sql().unwrap_err(), QbError::EmptyTable));
    }

    #[test]
    fn test_select_where_mismatch_fails() {
        let q = pg(&[]).from("t").where_(expr!("a = ?"));
        assert!(q.to_expr().unwrap_err().is_mismatch());
    }
}
