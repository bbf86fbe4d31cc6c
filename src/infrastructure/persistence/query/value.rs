//! Values bound to query parameters.

use sqlx::{Postgres, QueryBuilder};

use super::ident::quote_literal;

/// A scalar value carried by a query.
///
/// Values only ever reach the database through [`SqlValue::bind`], which
/// attaches them as `$n` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    BigInt(i64),
    Int(Option<i32>),
    Text(Option<String>),
}

impl SqlValue {
    /// Appends the value as a bound parameter.
    pub(crate) fn bind(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            SqlValue::BigInt(v) => {
                builder.push_bind(*v);
            }
            SqlValue::Int(v) => {
                builder.push_bind(*v);
            }
            SqlValue::Text(v) => {
                builder.push_bind(v.clone());
            }
        }
    }

    /// Renders the value as a quoted SQL literal, for logging.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::BigInt(v) => v.to_string(),
            SqlValue::Int(Some(v)) => v.to_string(),
            SqlValue::Text(Some(v)) => quote_literal(v),
            SqlValue::Int(None) | SqlValue::Text(None) => "NULL".to_string(),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::BigInt(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        SqlValue::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}
