//! `INSERT` composition and execution.

use sqlx::PgConnection;
use sqlx::postgres::PgRow;

use super::fragment::Fragment;
use super::ident::{Column, ColumnRef, Table};
use super::value::SqlValue;
use crate::error::StorageError;

/// An `INSERT INTO ... VALUES (...) [RETURNING ...]` statement.
///
/// Every row gets `created_at = now()` appended by the composer; the creation
/// time always comes from the database clock.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    table: Table,
    values: Vec<(ColumnRef, SqlValue)>,
    returning: Vec<ColumnRef>,
}

impl InsertQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            values: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Sets `column` to `value`; the value is sent as a bound parameter.
    pub fn value(mut self, column: ColumnRef, value: impl Into<SqlValue>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Columns to return from the inserted row.
    pub fn returning(mut self, columns: &[ColumnRef]) -> Self {
        self.returning = columns.to_vec();
        self
    }

    /// Assembles the statement.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidQuery`] if no value is set, a column
    /// belongs to another table, a column is set twice, or `created_at` is
    /// supplied by the caller.
    pub fn to_fragment(&self) -> Result<Fragment, StorageError> {
        self.validate()?;

        let created_at = created_at_of(self.table);

        let columns = self
            .values
            .iter()
            .map(|(column, _)| Fragment::new().bare_column(*column))
            .chain(std::iter::once(Fragment::new().bare_column(created_at)));

        let values = self
            .values
            .iter()
            .map(|(_, value)| Fragment::new().value(value.clone()))
            .chain(std::iter::once(Fragment::new().now()));

        let mut fragment = Fragment::new()
            .keyword("INSERT INTO ")
            .table(self.table)
            .keyword(" (")
            .join(", ", columns)
            .keyword(") VALUES (")
            .join(", ", values)
            .keyword(")");

        if !self.returning.is_empty() {
            fragment = fragment.keyword(" RETURNING ").join(
                ", ",
                self.returning.iter().map(|c| Fragment::new().bare_column(*c)),
            );
        }

        Ok(fragment.keyword(";"))
    }

    /// Parameterized SQL text of the statement.
    pub fn sql(&self) -> Result<String, StorageError> {
        Ok(self.to_fragment()?.to_sql())
    }

    /// Executes the statement.
    ///
    /// Returns `Some(rows)` with the `RETURNING` columns when a returning list
    /// was set, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the statement is invalid or the database
    /// rejects it.
    pub async fn execute(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Option<Vec<PgRow>>, StorageError> {
        let fragment = self.to_fragment()?;
        tracing::debug!(sql = %fragment.to_inline_sql(), "Executing insert");

        let mut builder = fragment.to_builder();
        let query = builder.build();

        let returned = if self.returning.is_empty() {
            query.execute(conn).await?;
            None
        } else {
            Some(query.fetch_all(conn).await?)
        };

        tracing::debug!(table = %self.table, "The insert operation is completed");
        Ok(returned)
    }

    fn validate(&self) -> Result<(), StorageError> {
        if self.values.is_empty() {
            return Err(StorageError::InvalidQuery("insert needs at least one value"));
        }

        for (i, (column, _)) in self.values.iter().enumerate() {
            if column.table() != self.table {
                return Err(StorageError::InvalidQuery(
                    "insert column belongs to another table",
                ));
            }
            if column.column() == Column::CreatedAt {
                return Err(StorageError::InvalidQuery(
                    "created_at is assigned by the database",
                ));
            }
            if self.values[..i].iter().any(|(c, _)| c == column) {
                return Err(StorageError::InvalidQuery("insert column set twice"));
            }
        }

        if self.returning.iter().any(|c| c.table() != self.table) {
            return Err(StorageError::InvalidQuery(
                "returning column belongs to another table",
            ));
        }

        Ok(())
    }
}

fn created_at_of(table: Table) -> ColumnRef {
    use super::ident::{url_checks, urls};

    match table {
        Table::Urls => urls::CREATED_AT,
        Table::UrlChecks => url_checks::CREATED_AT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::query::ident::{url_checks, urls};

    #[test]
    fn test_insert_appends_server_timestamp() {
        let sql = InsertQuery::new(Table::Urls)
            .value(urls::NAME, "https://example.com")
            .returning(&[urls::ID])
            .sql()
            .unwrap();

        assert_eq!(
            sql,
            r#"INSERT INTO "urls" ("name", "created_at") VALUES ($1, now()) RETURNING "id";"#
        );
    }

    #[test]
    fn test_insert_without_returning() {
        let query = InsertQuery::new(Table::UrlChecks)
            .value(url_checks::URL_ID, 1_i64)
            .value(url_checks::STATUS_CODE, Some(200))
            .value(url_checks::H1, None::<String>)
            .value(url_checks::TITLE, Some("Title".to_string()))
            .value(url_checks::DESCRIPTION, None::<String>);

        assert_eq!(
            query.sql().unwrap(),
            concat!(
                r#"INSERT INTO "url_checks" ("url_id", "status_code", "h1", "title", "description", "created_at") "#,
                r#"VALUES ($1, $2, $3, $4, $5, now());"#,
            )
        );
        assert_eq!(query.to_fragment().unwrap().values().len(), 5);
    }

    #[test]
    fn test_insert_values_are_bound_not_inlined() {
        let sql = InsertQuery::new(Table::Urls)
            .value(urls::NAME, "'); DELETE FROM urls; --")
            .sql()
            .unwrap();

        assert!(!sql.contains("DELETE"));
    }

    #[test]
    fn test_insert_rejects_caller_created_at() {
        let result = InsertQuery::new(Table::Urls)
            .value(urls::NAME, "https://example.com")
            .value(urls::CREATED_AT, "2020-01-01")
            .sql();

        assert!(matches!(result, Err(StorageError::InvalidQuery(_))));
    }

    #[test]
    fn test_insert_rejects_foreign_column() {
        let result = InsertQuery::new(Table::Urls)
            .value(url_checks::H1, "oops")
            .sql();

        assert!(matches!(result, Err(StorageError::InvalidQuery(_))));
    }

    #[test]
    fn test_insert_rejects_duplicate_column() {
        let result = InsertQuery::new(Table::Urls)
            .value(urls::NAME, "a")
            .value(urls::NAME, "b")
            .sql();

        assert!(matches!(result, Err(StorageError::InvalidQuery(_))));
    }

    #[test]
    fn test_insert_rejects_empty() {
        let result = InsertQuery::new(Table::Urls).sql();

        assert!(matches!(result, Err(StorageError::InvalidQuery(_))));
    }
}
