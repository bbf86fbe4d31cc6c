//! `SELECT` composition and execution.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

use super::clause;
use super::fragment::{Direction, Fragment};
use super::ident::{ColumnRef, Table};
use super::value::SqlValue;
use crate::error::StorageError;

/// A `SELECT` statement assembled from optional clauses.
///
/// Clauses are rendered in a fixed order regardless of the order the builder
/// methods were called in: selection, join, filter, sort.
///
/// # Example
///
/// ```rust,ignore
/// let query = SelectQuery::new(Table::UrlChecks, &[url_checks::URL_ID, url_checks::CREATED_AT])
///     .distinct_on(url_checks::URL_ID)
///     .order_by(url_checks::URL_ID, Direction::Asc)
///     .order_by(url_checks::CREATED_AT, Direction::Desc);
/// let rows = query.fetch_all(&mut conn).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: Table,
    fields: Vec<ColumnRef>,
    distinct: Option<ColumnRef>,
    joining: Option<(ColumnRef, ColumnRef)>,
    filtering: Option<(ColumnRef, SqlValue)>,
    sorting: Vec<(ColumnRef, Direction)>,
}

impl SelectQuery {
    pub fn new(table: Table, fields: &[ColumnRef]) -> Self {
        Self {
            table,
            fields: fields.to_vec(),
            distinct: None,
            joining: None,
            filtering: None,
            sorting: Vec::new(),
        }
    }

    /// Keeps only the first row of each distinct value of `column`.
    pub fn distinct_on(mut self, column: ColumnRef) -> Self {
        self.distinct = Some(column);
        self
    }

    /// Left-joins the table of `joined` on `base_column = joined`.
    ///
    /// A query has at most one join; calling this again replaces it.
    pub fn left_join(mut self, joined: ColumnRef, base_column: ColumnRef) -> Self {
        self.joining = Some((joined, base_column));
        self
    }

    /// Restricts rows to `column = value`.
    ///
    /// A query has at most one filter; calling this again replaces it.
    pub fn filter(mut self, column: ColumnRef, value: impl Into<SqlValue>) -> Self {
        self.filtering = Some((column, value.into()));
        self
    }

    /// Adds a sort key after the existing ones.
    pub fn order_by(mut self, column: ColumnRef, direction: Direction) -> Self {
        self.sorting.push((column, direction));
        self
    }

    /// Assembles the statement.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidQuery`] if the field list is empty, the
    /// join targets the base table, or a column belongs to a table that is not
    /// part of the query.
    pub fn to_fragment(&self) -> Result<Fragment, StorageError> {
        self.validate()?;

        let mut fragment = clause::selection(self.table, &self.fields, self.distinct);

        if let Some((joined, base_column)) = self.joining {
            fragment = fragment
                .keyword(" ")
                .append(clause::left_join(self.table, joined, base_column));
        }

        if let Some((column, value)) = &self.filtering {
            fragment = fragment
                .keyword(" ")
                .append(clause::filter(*column, value.clone()));
        }

        if !self.sorting.is_empty() {
            fragment = fragment.keyword(" ").append(clause::sort(&self.sorting));
        }

        Ok(fragment.keyword(";"))
    }

    /// Parameterized SQL text of the statement.
    pub fn sql(&self) -> Result<String, StorageError> {
        Ok(self.to_fragment()?.to_sql())
    }

    /// Executes the statement and returns every row, fields in query order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the statement is invalid or the database
    /// rejects it. Zero matching rows is `Ok(vec![])`.
    pub async fn fetch_all(&self, conn: &mut PgConnection) -> Result<Vec<PgRow>, StorageError> {
        let fragment = self.to_fragment()?;
        tracing::debug!(sql = %fragment.to_inline_sql(), "Executing select");

        let mut builder = fragment.to_builder();
        let rows = builder.build().fetch_all(conn).await?;

        tracing::debug!(table = %self.table, rows = rows.len(), "The select operation is completed");
        Ok(rows)
    }

    /// Executes the statement and decodes every row into `T`.
    pub async fn fetch_all_as<T>(&self, conn: &mut PgConnection) -> Result<Vec<T>, StorageError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = self.fetch_all(conn).await?;
        rows.iter()
            .map(|row| T::from_row(row).map_err(StorageError::from))
            .collect()
    }

    fn validate(&self) -> Result<(), StorageError> {
        if self.fields.is_empty() {
            return Err(StorageError::InvalidQuery("selection needs at least one field"));
        }

        let joined_table = match self.joining {
            Some((joined, base_column)) => {
                if joined.table() == self.table {
                    return Err(StorageError::InvalidQuery("a table cannot be joined to itself"));
                }
                if base_column.table() != self.table {
                    return Err(StorageError::InvalidQuery(
                        "join column must belong to the base table",
                    ));
                }
                Some(joined.table())
            }
            None => None,
        };

        let in_scope = |column: &ColumnRef| {
            column.table() == self.table || Some(column.table()) == joined_table
        };

        let referenced = self
            .fields
            .iter()
            .chain(self.distinct.iter())
            .chain(self.filtering.iter().map(|(c, _)| c))
            .chain(self.sorting.iter().map(|(c, _)| c));

        for column in referenced {
            if !in_scope(column) {
                return Err(StorageError::InvalidQuery(
                    "column refers to a table outside the query",
                ));
            }
        }

        Ok(())
    }
}
