//! Connection lifecycle.
//!
//! A [`Session`] is one unit of work: a pooled connection inside a transaction
//! with a statement timeout. It ends with [`Session::close`] (commit) or
//! [`Session::rollback`]; [`Session::finish`] picks one based on the outcome.

use std::time::Duration;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::query::{InsertQuery, SelectQuery};
use crate::config::Config;
use crate::error::StorageError;

/// Handle to the PostgreSQL pool, cheap to clone.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    statement_timeout: Duration,
}

impl Database {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Creates the connection pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the first connection cannot be
    /// established.
    pub async fn connect(config: &Config) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await?;

        Ok(Self::new(
            pool,
            Duration::from_millis(config.db_statement_timeout_ms),
        ))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Opens a session: acquires a connection, begins a transaction and sets
    /// the statement timeout for that transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if no connection can be acquired.
    pub async fn open(&self) -> Result<Session, StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT set_config('statement_timeout', $1, true)")
            .bind(format!("{}ms", self.statement_timeout.as_millis()))
            .execute(&mut *tx)
            .await?;

        tracing::debug!("A connection to the database has been established");
        Ok(Session { tx })
    }

    /// Runs a trivial query to verify connectivity.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// One unit of work against the database.
///
/// Dropping a session without closing it rolls the transaction back.
pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    /// Executes a select and returns the rows.
    pub async fn select(&mut self, query: &SelectQuery) -> Result<Vec<PgRow>, StorageError> {
        query.fetch_all(&mut self.tx).await
    }

    /// Executes a select and decodes the rows into `T`.
    pub async fn select_as<T>(&mut self, query: &SelectQuery) -> Result<Vec<T>, StorageError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        query.fetch_all_as(&mut self.tx).await
    }

    /// Executes an insert; see [`InsertQuery::execute`].
    pub async fn insert(
        &mut self,
        query: &InsertQuery,
    ) -> Result<Option<Vec<PgRow>>, StorageError> {
        query.execute(&mut self.tx).await
    }

    /// Commits pending writes and releases the connection.
    pub async fn close(self) -> Result<(), StorageError> {
        self.tx.commit().await?;
        tracing::debug!("The changes are committed and the connection is released");
        Ok(())
    }

    /// Discards pending writes and releases the connection.
    pub async fn rollback(self) -> Result<(), StorageError> {
        self.tx.rollback().await?;
        tracing::debug!("The changes are rolled back and the connection is released");
        Ok(())
    }

    /// Ends the session according to `result`: commits on `Ok`, rolls back on
    /// `Err` and returns the original error.
    pub async fn finish<T>(self, result: Result<T, StorageError>) -> Result<T, StorageError> {
        match result {
            Ok(value) => {
                self.close().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}
