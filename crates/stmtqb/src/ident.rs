//! SQL identifier quoting.
//!
//! Identifiers (schema/table/column) may use dotted notation. Each part is
//! one of:
//!
//! - a bare part, written unquoted when it matches `[a-z_][a-z0-9_$]*` and is
//!   not reserved by the dialect, otherwise wrapped in the quote character
//!   with embedded quotes doubled
//! - an already quoted part (`"My.Table"`, `` `order` ``), written through
//!   unchanged; dots inside it do not split and doubled quotes are kept
//! - `*`, passed through (e.g. `users.*`)
//!
//! Empty parts, unclosed quotes and NUL characters are rejected.
//!
//! # Example
//! ```ignore
//! let mut out = String::new();
//! write_dotted(&mut out, r#"public."Users".Name"#, '"', POSTGRES_RESERVED)?;
//! assert_eq!(out, r#"public."Users"."Name""#);
//! ```

use crate::error::{QbError, QbResult};

/// PostgreSQL keywords that cannot be used as bare column or table names.
///
/// Covers the "reserved" and "reserved (can be function or type)" classes of
/// the PostgreSQL keyword table, plus a few DML words kept quoted for clarity.
pub(crate) const POSTGRES_RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation",
    "column", "concurrently", "constraint", "create", "cross", "current_catalog",
    "current_date", "current_role", "current_schema", "current_time", "current_timestamp",
    "current_user", "default", "deferrable", "delete", "desc", "distinct", "do", "else", "end",
    "except", "false", "fetch", "for", "foreign", "freeze", "from", "full", "grant", "group",
    "having", "ilike", "in", "index", "initially", "inner", "insert", "intersect", "into", "is",
    "isnull", "join", "key", "lateral", "leading", "left", "like", "limit", "localtime",
    "localtimestamp", "natural", "not", "notnull", "null", "offset", "on", "only", "or",
    "order", "outer", "overlaps", "placing", "primary", "references", "returning", "right",
    "select", "session_user", "set", "similar", "some", "symmetric", "system_user", "table",
    "tablesample", "then", "to", "trailing", "true", "union", "unique", "update", "user",
    "using", "values", "variadic", "verbose", "when", "where", "window", "with",
];

/// MySQL 8 reserved words.
pub(crate) const MYSQL_RESERVED: &[&str] = &[
    "accessible", "add", "all", "alter", "analyze", "and", "as", "asc", "asensitive", "before",
    "between", "bigint", "binary", "blob", "both", "by", "call", "cascade", "case", "change",
    "char", "character", "check", "collate", "column", "condition", "constraint", "continue",
    "convert", "create", "cross", "cube", "cume_dist", "current_date", "current_time",
    "current_timestamp", "current_user", "cursor", "database", "databases", "day_hour",
    "day_microsecond", "day_minute", "day_second", "dec", "decimal", "declare", "default",
    "delayed", "delete", "dense_rank", "desc", "describe", "deterministic", "distinct",
    "distinctrow", "div", "double", "drop", "dual", "each", "else", "elseif", "empty",
    "enclosed", "escaped", "except", "exists", "exit", "explain", "false", "fetch",
    "first_value", "float", "float4", "float8", "for", "force", "foreign", "from", "fulltext",
    "function", "generated", "get", "grant", "group", "grouping", "groups", "having",
    "high_priority", "hour_microsecond", "hour_minute", "hour_second", "if", "ignore", "in",
    "index", "infile", "inner", "inout", "insensitive", "insert", "int", "int1", "int2", "int3",
    "int4", "int8", "integer", "intersect", "interval", "into", "io_after_gtids",
    "io_before_gtids", "is", "iterate", "join", "json_table", "key", "keys", "kill", "lag",
    "last_value", "lateral", "lead", "leading", "leave", "left", "like", "limit", "linear",
    "lines", "load", "localtime", "localtimestamp", "lock", "long", "longblob", "longtext",
    "loop", "low_priority", "master_bind", "master_ssl_verify_server_cert", "match",
    "maxvalue", "mediumblob", "mediumint", "mediumtext", "middleint", "minute_microsecond",
    "minute_second", "mod", "modifies", "natural", "no_write_to_binlog", "not", "nth_value",
    "ntile", "null", "numeric", "of", "on", "optimize", "optimizer_costs", "option",
    "optionally", "or", "order", "out", "outer", "outfile", "over", "partition",
    "percent_rank", "precision", "primary", "procedure", "purge", "range", "rank", "read",
    "read_write", "reads", "real", "recursive", "references", "regexp", "release", "rename",
    "repeat", "replace", "require", "resignal", "restrict", "return", "revoke", "right",
    "rlike", "row", "row_number", "rows", "schema", "schemas", "second_microsecond", "select",
    "sensitive", "separator", "set", "show", "signal", "smallint", "spatial", "specific", "sql",
    "sql_big_result", "sql_calc_found_rows", "sql_small_result", "sqlexception", "sqlstate",
    "sqlwarning", "ssl", "starting", "stored", "straight_join", "system", "table",
    "terminated", "then", "tinyblob", "tinyint", "tinytext", "to", "trailing", "trigger",
    "true", "undo", "union", "unique", "unlock", "unsigned", "update", "usage", "use", "using",
    "utc_date", "utc_time", "utc_timestamp", "values", "varbinary", "varchar", "varcharacter",
    "varying", "virtual", "when", "where", "while", "window", "with", "write", "xor",
    "year_month", "zerofill",
];

/// SQLite keywords.
pub(crate) const SQLITE_RESERVED: &[&str] = &[
    "abort", "action", "add", "after", "all", "alter", "always", "analyze", "and", "as", "asc",
    "attach", "autoincrement", "before", "begin", "between", "by", "cascade", "case", "cast",
    "check", "collate", "column", "commit", "conflict", "constraint", "create", "cross",
    "current", "current_date", "current_time", "current_timestamp", "database", "default",
    "deferrable", "deferred", "delete", "desc", "detach", "distinct", "do", "drop", "each",
    "else", "end", "escape", "except", "exclude", "exclusive", "exists", "explain", "fail",
    "filter", "first", "following", "for", "foreign", "from", "full", "generated", "glob",
    "group", "groups", "having", "if", "ignore", "immediate", "in", "index", "indexed",
    "initially", "inner", "insert", "instead", "intersect", "into", "is", "isnull", "join",
    "key", "last", "left", "like", "limit", "match", "materialized", "natural", "no", "not",
    "nothing", "notnull", "null", "nulls", "of", "offset", "on", "or", "order", "others",
    "outer", "over", "partition", "plan", "pragma", "preceding", "primary", "query", "raise",
    "range", "recursive", "references", "regexp", "reindex", "release", "rename", "replace",
    "restrict", "returning", "right", "rollback", "row", "rows", "savepoint", "select", "set",
    "table", "temp", "temporary", "then", "ties", "to", "transaction", "trigger", "unbounded",
    "union", "unique", "update", "using", "vacuum", "values", "view", "virtual", "when",
    "where", "window", "with", "without",
];

/// One part of a dotted identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdentPart<'a> {
    /// As written by the caller, quoted on output only if needed.
    Bare(&'a str),
    /// Already quoted, including the surrounding quotes.
    Quoted(&'a str),
    /// `*`
    Star,
}

fn invalid(name: &str, reason: &'static str) -> QbError {
    QbError::InvalidIdentifier {
        name: name.to_string(),
        reason,
    }
}

/// Split a dotted identifier into parts, honouring quoted parts.
fn parse<'a>(name: &'a str, quote: char) -> QbResult<Vec<IdentPart<'a>>> {
    if name.is_empty() {
        return Err(invalid(name, "identifier cannot be empty"));
    }
    if name.contains('\0') {
        return Err(invalid(name, "identifier cannot contain NUL character"));
    }

    let mut parts = Vec::new();
    let mut rest = name;
    loop {
        let (part, tail) = if rest.starts_with(quote) {
            let end = closing_quote(rest, quote)
                .ok_or_else(|| invalid(name, "unclosed quoted identifier"))?;
            if end == quote.len_utf8() {
                return Err(invalid(name, "empty quoted identifier"));
            }
            let (quoted, tail) = rest.split_at(end + quote.len_utf8());
            if !(tail.is_empty() || tail.starts_with('.')) {
                return Err(invalid(name, "expected '.' after quoted identifier part"));
            }
            (IdentPart::Quoted(quoted), tail)
        } else {
            let end = rest.find('.').unwrap_or(rest.len());
            let (bare, tail) = rest.split_at(end);
            match bare {
                "" => return Err(invalid(name, "empty identifier segment")),
                "*" => (IdentPart::Star, tail),
                _ => (IdentPart::Bare(bare), tail),
            }
        };
        parts.push(part);

        match tail.strip_prefix('.') {
            None => break,
            Some("") => return Err(invalid(name, "trailing '.' in identifier")),
            Some(next) => rest = next,
        }
    }
    Ok(parts)
}

/// Byte offset of the quote closing the part that opens at `s[0]`.
fn closing_quote(s: &str, quote: char) -> Option<usize> {
    let width = quote.len_utf8();
    let mut offset = width;
    while let Some(idx) = s[offset..].find(quote) {
        let at = offset + idx;
        if s[at + width..].starts_with(quote) {
            offset = at + 2 * width;
        } else {
            return Some(at);
        }
    }
    None
}

/// Check whether a single identifier part can be written without quotes.
pub(crate) fn is_plain(part: &str, reserved: &[&str]) -> bool {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_lowercase()) {
        return false;
    }
    if !chars.all(|c| c == '_' || c == '$' || c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return false;
    }
    !reserved.contains(&part)
}

/// Write `part` wrapped in `quote`, doubling any embedded quote characters.
pub(crate) fn write_quoted(out: &mut String, part: &str, quote: char) {
    out.reserve(part.len() + 2);
    out.push(quote);
    for ch in part.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}

/// Write a possibly dotted identifier, quoting only the parts that need it.
pub(crate) fn write_dotted(
    out: &mut String,
    name: &str,
    quote: char,
    reserved: &[&str],
) -> QbResult<()> {
    for (i, part) in parse(name, quote)?.into_iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        match part {
            IdentPart::Star => out.push('*'),
            IdentPart::Quoted(quoted) => out.push_str(quoted),
            IdentPart::Bare(bare) if is_plain(bare, reserved) => out.push_str(bare),
            IdentPart::Bare(bare) => write_quoted(out, bare, quote),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dotted(name: &str) -> String {
        let mut out = String::new();
        write_dotted(&mut out, name, '"', POSTGRES_RESERVED).unwrap();
        out
    }

    fn dotted_err(name: &str) -> &'static str {
        let mut out = String::new();
        match write_dotted(&mut out, name, '"', POSTGRES_RESERVED) {
            Err(QbError::InvalidIdentifier { reason, .. }) => reason,
            other => panic!("expected InvalidIdentifier for {name:?}, got {other:?}"),
        }
    }

    #[test]
    fn ident_simple() {
        assert_eq!(dotted("users"), "users");
    }

    #[test]
    fn ident_dotted() {
        assert_eq!(dotted("public.users"), "public.users");
    }

    #[test]
    fn ident_with_dollar() {
        assert_eq!(dotted("my_var$1"), "my_var$1");
    }

    #[test]
    fn ident_star() {
        assert_eq!(dotted("u.*"), "u.*");
    }

    #[test]
    fn ident_mixed_case_is_quoted() {
        assert_eq!(dotted("public.UserTable"), r#"public."UserTable""#);
    }

    #[test]
    fn ident_reserved_is_quoted() {
        assert_eq!(dotted("user"), r#""user""#);
        assert_eq!(dotted("orders.order"), r#"orders."order""#);
    }

    #[test]
    fn ident_join_and_operator_keywords_are_quoted() {
        for word in [
            "left", "right", "like", "ilike", "inner", "outer", "full", "cross", "natural",
            "similar", "lateral", "analyze", "verbose", "authorization", "binary", "freeze",
            "isnull", "notnull", "overlaps", "tablesample", "localtime", "variadic",
            "current_schema", "collation", "concurrently",
        ] {
            assert_eq!(dotted(word), format!("\"{word}\""), "{word}");
        }
    }

    #[test]
    fn ident_reserved_set_is_per_dialect() {
        assert!(is_plain("range", POSTGRES_RESERVED));
        assert!(!is_plain("range", MYSQL_RESERVED));
        assert!(is_plain("user", MYSQL_RESERVED));
        assert!(!is_plain("user", POSTGRES_RESERVED));
    }

    #[test]
    fn ident_space_is_quoted() {
        assert_eq!(dotted("my table"), r#""my table""#);
    }

    #[test]
    fn ident_quote_is_escaped() {
        assert_eq!(dotted(r#"has"quote"#), r#""has""quote""#);
    }

    #[test]
    fn ident_start_digit_is_quoted() {
        assert_eq!(dotted("1table"), r#""1table""#);
    }

    #[test]
    fn ident_quoted_part_is_kept() {
        assert_eq!(dotted(r#"public."Users""#), r#"public."Users""#);
        assert_eq!(dotted(r#""CamelCase"."UserTable".id"#), r#""CamelCase"."UserTable".id"#);
    }

    #[test]
    fn ident_quoted_part_keeps_dots() {
        assert_eq!(dotted(r#""My.Table""#), r#""My.Table""#);
        assert_eq!(dotted(r#"s."a.b".c"#), r#"s."a.b".c"#);
    }

    #[test]
    fn ident_quoted_part_keeps_escaped_quotes() {
        assert_eq!(dotted(r#""say ""hi""""#), r#""say ""hi""""#);
    }

    #[test]
    fn ident_empty_segments_fail() {
        assert_eq!(dotted_err(""), "identifier cannot be empty");
        assert_eq!(dotted_err("a."), "trailing '.' in identifier");
        assert_eq!(dotted_err(".a"), "empty identifier segment");
        assert_eq!(dotted_err("a..b"), "empty identifier segment");
        assert_eq!(dotted_err(r#""""#), "empty quoted identifier");
    }

    #[test]
    fn ident_malformed_quotes_fail() {
        assert_eq!(dotted_err(r#""open"#), "unclosed quoted identifier");
        assert_eq!(dotted_err(r#""a"b"#), "expected '.' after quoted identifier part");
        assert_eq!(dotted_err("a\0b"), "identifier cannot contain NUL character");
    }

    #[test]
    fn backtick_quote_is_escaped() {
        let mut out = String::new();
        write_quoted(&mut out, "we`ird", '`');
        assert_eq!(out, "`we``ird`");
    }

    #[test]
    fn backtick_quoted_part_is_kept() {
        let mut out = String::new();
        write_dotted(&mut out, "shop.`my.orders`", '`', MYSQL_RESERVED).unwrap();
        assert_eq!(out, "shop.`my.orders`");
    }
}
