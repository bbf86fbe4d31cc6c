//! Token representation of SQL fragments and their rendering.
//!
//! A [`Fragment`] is a flat list of [`Token`]s. Identifiers and values are
//! distinct token kinds: identifiers are quoted into the SQL text, values are
//! bound as parameters. No token kind turns a value into SQL text, so the two
//! paths cannot be mixed up by a clause builder.

use sqlx::{Postgres, QueryBuilder};

use super::ident::{ColumnRef, Table};
use super::value::SqlValue;

/// Sort direction of an `ORDER BY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One piece of a SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Fixed SQL text written by the builders themselves.
    Keyword(&'static str),
    Table(Table),
    /// `"table"."column"`
    Column(ColumnRef),
    /// `"column"`, for `INSERT` column lists and `RETURNING`.
    BareColumn(ColumnRef),
    Value(SqlValue),
    Direction(Direction),
    /// Server-side clock, rendered as `now()`.
    Now,
}

/// A composable piece of SQL made of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    tokens: Vec<Token>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, text: &'static str) -> Self {
        self.tokens.push(Token::Keyword(text));
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tokens.push(Token::Table(table));
        self
    }

    pub fn column(mut self, column: ColumnRef) -> Self {
        self.tokens.push(Token::Column(column));
        self
    }

    pub fn bare_column(mut self, column: ColumnRef) -> Self {
        self.tokens.push(Token::BareColumn(column));
        self
    }

    pub fn value(mut self, value: SqlValue) -> Self {
        self.tokens.push(Token::Value(value));
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.tokens.push(Token::Direction(direction));
        self
    }

    pub fn now(mut self) -> Self {
        self.tokens.push(Token::Now);
        self
    }

    /// Appends every token of `other`.
    pub fn append(mut self, other: Fragment) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Appends `items` separated by `separator`.
    pub fn join<I>(mut self, separator: &'static str, items: I) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.tokens.push(Token::Keyword(separator));
            }
            self.tokens.extend(item.tokens);
        }
        self
    }

    /// Writes the fragment into a query builder, binding values as parameters.
    pub fn render_into(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        for token in &self.tokens {
            match token {
                Token::Keyword(text) => {
                    builder.push(*text);
                }
                Token::Table(table) => {
                    builder.push(table.quoted());
                }
                Token::Column(column) => {
                    builder.push(column.qualified());
                }
                Token::BareColumn(column) => {
                    builder.push(column.unqualified());
                }
                Token::Value(value) => value.bind(builder),
                Token::Direction(direction) => {
                    builder.push(direction.as_sql());
                }
                Token::Now => {
                    builder.push("now()");
                }
            }
        }
    }

    /// Renders into a fresh query builder.
    pub fn to_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("");
        self.render_into(&mut builder);
        builder
    }

    /// Parameterized SQL text with `$n` placeholders.
    pub fn to_sql(&self) -> String {
        self.to_builder().sql().to_string()
    }

    /// SQL text with values inlined as quoted literals.
    ///
    /// Meant for debug logs; never executed.
    pub fn to_inline_sql(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Keyword(text) => out.push_str(text),
                Token::Table(table) => out.push_str(&table.quoted()),
                Token::Column(column) => out.push_str(&column.qualified()),
                Token::BareColumn(column) => out.push_str(&column.unqualified()),
                Token::Value(value) => out.push_str(&value.to_literal()),
                Token::Direction(direction) => out.push_str(direction.as_sql()),
                Token::Now => out.push_str("now()"),
            }
        }
        out
    }

    /// Values in binding order.
    pub fn values(&self) -> Vec<&SqlValue> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Value(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::query::ident::urls;

    #[test]
    fn test_values_are_placeholders_in_sql() {
        let fragment = Fragment::new()
            .column(urls::NAME)
            .keyword(" = ")
            .value(SqlValue::from("https://example.com"));

        assert_eq!(fragment.to_sql(), r#""urls"."name" = $1"#);
        assert_eq!(
            fragment.to_inline_sql(),
            r#""urls"."name" = 'https://example.com'"#
        );
        assert_eq!(fragment.values().len(), 1);
    }

    #[test]
    fn test_join_inserts_separator_between_items_only() {
        let fragment = Fragment::new().join(
            ", ",
            [urls::ID, urls::NAME, urls::CREATED_AT]
                .into_iter()
                .map(|c| Fragment::new().column(c)),
        );

        assert_eq!(
            fragment.to_sql(),
            r#""urls"."id", "urls"."name", "urls"."created_at""#
        );
    }

    #[test]
    fn test_placeholders_number_across_fragments() {
        let fragment = Fragment::new()
            .value(SqlValue::from(1_i64))
            .keyword(", ")
            .append(Fragment::new().value(SqlValue::from(2_i64)));

        assert_eq!(fragment.to_sql(), "$1, $2");
    }
}
