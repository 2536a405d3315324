//! Database dialects: identifier quoting and placeholder syntax.
//!
//! A [`Dialect`] is consulted for every identifier and every bound parameter a
//! builder writes. Builders hold it as `Arc<dyn Dialect>` so one dialect value
//! can be shared by any number of statements.

use crate::error::QbResult;
use crate::ident::{MYSQL_RESERVED, POSTGRES_RESERVED, SQLITE_RESERVED, write_dotted};
use std::fmt::Debug;
use std::fmt::Write as _;

/// Database-specific rules for identifiers and placeholders.
pub trait Dialect: Debug + Send + Sync {
    /// Short dialect name, e.g. `"postgres"`.
    fn name(&self) -> &'static str;

    /// Write a correctly quoted/escaped identifier.
    ///
    /// Dotted names are split into parts; parts the caller already quoted are
    /// written unchanged. Malformed names fail with
    /// [`QbError::InvalidIdentifier`](crate::QbError::InvalidIdentifier).
    fn write_identifier(&self, buf: &mut String, name: &str) -> QbResult<()>;

    /// Write the placeholder token for the given 1-based position.
    fn write_placeholder(&self, buf: &mut String, position: usize);

    /// Render an identifier into a new string.
    fn quote_identifier(&self, name: &str) -> QbResult<String> {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_identifier(&mut out, name)?;
        Ok(out)
    }

    /// Render a placeholder into a new string.
    fn placeholder(&self, position: usize) -> String {
        let mut out = String::with_capacity(4);
        self.write_placeholder(&mut out, position);
        out
    }
}

/// PostgreSQL: `$1, $2, ...` placeholders, `"double quoted"` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn write_identifier(&self, buf: &mut String, name: &str) -> QbResult<()> {
        write_dotted(buf, name, '"', POSTGRES_RESERVED)
    }

    fn write_placeholder(&self, buf: &mut String, position: usize) {
        let _ = write!(buf, "${position}");
    }
}

/// SQLite: `?` placeholders, `"double quoted"` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write_identifier(&self, buf: &mut String, name: &str) -> QbResult<()> {
        write_dotted(buf, name, '"', SQLITE_RESERVED)
    }

    fn write_placeholder(&self, buf: &mut String, _position: usize) {
        buf.push('?');
    }
}

/// MySQL: `?` placeholders, `` `backtick quoted` `` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn write_identifier(&self, buf: &mut String, name: &str) -> QbResult<()> {
        write_dotted(buf, name, '`', MYSQL_RESERVED)
    }

    fn write_placeholder(&self, buf: &mut String, _position: usize) {
        buf.push('?');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QbError;

    #[test]
    fn postgres_placeholders_are_numbered() {
        assert_eq!(Postgres.placeholder(1), "$1");
        assert_eq!(Postgres.placeholder(12), "$12");
    }

    #[test]
    fn positional_dialects_ignore_position() {
        assert_eq!(Sqlite.placeholder(3), "?");
        assert_eq!(MySql.placeholder(3), "?");
    }

    #[test]
    fn postgres_quotes_reserved_and_mixed_case() {
        assert_eq!(Postgres.quote_identifier("email").unwrap(), "email");
        assert_eq!(Postgres.quote_identifier("user").unwrap(), r#""user""#);
        assert_eq!(Postgres.quote_identifier("People").unwrap(), r#""People""#);
        assert_eq!(Postgres.quote_identifier("left").unwrap(), r#""left""#);
        assert_eq!(Postgres.quote_identifier("like").unwrap(), r#""like""#);
    }

    #[test]
    fn postgres_keeps_quoted_parts() {
        assert_eq!(Postgres.quote_identifier(r#""My.Table""#).unwrap(), r#""My.Table""#);
        assert_eq!(Postgres.quote_identifier(r#"public."Users""#).unwrap(), r#"public."Users""#);
    }

    #[test]
    fn trailing_dot_is_rejected() {
        let err = Postgres.quote_identifier("a.").unwrap_err();
        assert!(matches!(err, QbError::InvalidIdentifier { .. }));
    }

    #[test]
    fn mysql_uses_backticks() {
        assert_eq!(MySql.quote_identifier("order").unwrap(), "`order`");
        assert_eq!(MySql.quote_identifier("shop.order").unwrap(), "shop.`order`");
        assert_eq!(MySql.quote_identifier("name").unwrap(), "name");
    }

    #[test]
    fn mysql_reserves_its_own_words() {
        for word in ["range", "interval", "rows", "div", "mod", "match"] {
            assert_eq!(MySql.quote_identifier(word).unwrap(), format!("`{word}`"));
        }
        assert_eq!(MySql.quote_identifier("user").unwrap(), "user");
    }

    #[test]
    fn sqlite_reserves_its_own_words() {
        assert_eq!(Sqlite.quote_identifier("pragma").unwrap(), r#""pragma""#);
        assert_eq!(Sqlite.quote_identifier("user").unwrap(), "user");
    }
}
