//! Table and column identifiers known to the query builder.
//!
//! The schema is a closed set: every table is a [`Table`] variant and every
//! qualified column is one of the [`ColumnRef`] constants in [`urls`] and
//! [`url_checks`]. Identifiers are never built from caller-supplied strings,
//! so an unknown table or column cannot be expressed at all.
//!
//! Rendering still goes through [`quote_ident`], which double-quotes the name
//! and doubles any embedded `"`.

use std::fmt;

/// A table of the page analyzer schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Urls,
    UrlChecks,
}

impl Table {
    /// Unquoted table name as declared in the migrations.
    pub const fn name(self) -> &'static str {
        match self {
            Table::Urls => "urls",
            Table::UrlChecks => "url_checks",
        }
    }

    /// Quoted table name, safe to splice into SQL text.
    pub fn quoted(self) -> String {
        quote_ident(self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column name, independent of the table it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    CreatedAt,
    UrlId,
    StatusCode,
    H1,
    Title,
    Description,
}

impl Column {
    /// Unquoted column name as declared in the migrations.
    pub const fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::CreatedAt => "created_at",
            Column::UrlId => "url_id",
            Column::StatusCode => "status_code",
            Column::H1 => "h1",
            Column::Title => "title",
            Column::Description => "description",
        }
    }
}

/// A table-qualified column, rendered as `"table"."column"`.
///
/// Only the constants in [`urls`] and [`url_checks`] can construct one, which
/// keeps every reference consistent with the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: Table,
    column: Column,
}

impl ColumnRef {
    const fn of(table: Table, column: Column) -> Self {
        Self { table, column }
    }

    pub fn table(self) -> Table {
        self.table
    }

    pub fn column(self) -> Column {
        self.column
    }

    /// Fully qualified and quoted reference, e.g. `"urls"."name"`.
    pub fn qualified(self) -> String {
        format!("{}.{}", self.table.quoted(), quote_ident(self.column.name()))
    }

    /// Quoted column name without the table prefix, as required by
    /// `INSERT` column lists and `RETURNING`.
    pub fn unqualified(self) -> String {
        quote_ident(self.column.name())
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table.name(), self.column.name())
    }
}

/// Columns of the `urls` table.
pub mod urls {
    use super::{Column, ColumnRef, Table};

    pub const ID: ColumnRef = ColumnRef::of(Table::Urls, Column::Id);
    pub const NAME: ColumnRef = ColumnRef::of(Table::Urls, Column::Name);
    pub const CREATED_AT: ColumnRef = ColumnRef::of(Table::Urls, Column::CreatedAt);
}

/// Columns of the `url_checks` table.
pub mod url_checks {
    use super::{Column, ColumnRef, Table};

    pub const ID: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::Id);
    pub const URL_ID: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::UrlId);
    pub const STATUS_CODE: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::StatusCode);
    pub const H1: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::H1);
    pub const TITLE: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::Title);
    pub const DESCRIPTION: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::Description);
    pub const CREATED_AT: ColumnRef = ColumnRef::of(Table::UrlChecks, Column::CreatedAt);
}

/// Quotes an identifier for PostgreSQL: wraps it in `"` and doubles embedded quotes.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Quotes a string literal for PostgreSQL: wraps it in `'` and doubles embedded quotes.
///
/// Used for the inline rendering of statements in debug logs only; values sent
/// to the database are always bound parameters.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("urls"), r#""urls""#);
    }

    #[test]
    fn test_quote_ident_escapes_double_quote() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_quote_literal_escapes_single_quote() {
        assert_eq!(
            quote_literal("'; DROP TABLE urls; --"),
            "'''; DROP TABLE urls; --'"
        );
    }

    #[test]
    fn test_qualified_column() {
        assert_eq!(url_checks::URL_ID.qualified(), r#""url_checks"."url_id""#);
        assert_eq!(urls::NAME.unqualified(), r#""name""#);
        assert_eq!(urls::CREATED_AT.to_string(), "urls.created_at");
    }

    #[test]
    fn test_column_table_membership() {
        assert_eq!(urls::ID.table(), Table::Urls);
        assert_eq!(url_checks::ID.table(), Table::UrlChecks);
        assert_eq!(url_checks::ID.column(), Column::Id);
    }
}
