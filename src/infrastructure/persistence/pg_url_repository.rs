//! PostgreSQL implementation of the Url repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::database::{Database, Session};
use super::query::{Direction, InsertQuery, SelectQuery, Table, url_checks, urls};
use crate::domain::entities::{Check, NewCheck, Url, UrlListing};
use crate::domain::repositories::UrlRepository;
use crate::error::StorageError;

#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct UrlNameRow {
    id: i64,
    name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct LatestCheckRow {
    created_at: DateTime<Utc>,
    status_code: Option<i32>,
    url_id: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CheckRow {
    id: i64,
    url_id: i64,
    status_code: Option<i32>,
    h1: Option<String>,
    title: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CheckRow> for Check {
    fn from(r: CheckRow) -> Self {
        Check {
            id: r.id,
            url_id: r.url_id,
            status_code: r.status_code,
            h1: r.h1,
            title: r.title,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for URLs and their checks.
///
/// Every statement is built with the query builder in [`super::query`]; each
/// method runs in its own [`Session`] that commits on success and rolls back
/// on failure.
#[derive(Clone)]
pub struct PgUrlRepository {
    db: Database,
}

impl PgUrlRepository {
    /// Creates a new repository on top of a database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create_url(&self, name: &str) -> Result<i64, StorageError> {
        let mut session = self.db.open().await?;
        let result = insert_url(&mut session, name).await;
        let id = session.finish(result).await?;

        tracing::info!(url_id = id, "The URL information has been added to the database");
        Ok(id)
    }

    async fn check_url(&self, name: &str) -> Result<Option<i64>, StorageError> {
        let query = SelectQuery::new(Table::Urls, &[urls::ID]).filter(urls::NAME, name);

        let mut session = self.db.open().await?;
        let result = session.select(&query).await;
        let rows = session.finish(result).await?;

        rows.first()
            .map(|row| row.try_get::<i64, _>(0))
            .transpose()
            .map_err(StorageError::from)
    }

    async fn get_url(&self, id: i64) -> Result<Option<Url>, StorageError> {
        let query = SelectQuery::new(Table::Urls, &[urls::ID, urls::NAME, urls::CREATED_AT])
            .filter(urls::ID, id);

        let mut session = self.db.open().await?;
        let result = session.select_as::<UrlRow>(&query).await;
        let rows = session.finish(result).await?;

        Ok(rows
            .into_iter()
            .next()
            .map(|r| Url::new(r.id, r.name, r.created_at)))
    }

    async fn get_urls(&self) -> Result<Vec<UrlListing>, StorageError> {
        let mut session = self.db.open().await?;
        let result = select_listing_parts(&mut session).await;
        let (urls, checks) = session.finish(result).await?;

        tracing::debug!(count = urls.len(), "The URLs information was obtained from the database");
        Ok(merge_latest_checks(urls, checks))
    }

    async fn create_check(&self, url_id: i64, check: NewCheck) -> Result<i64, StorageError> {
        let query = InsertQuery::new(Table::UrlChecks)
            .value(url_checks::URL_ID, url_id)
            .value(url_checks::STATUS_CODE, check.status_code)
            .value(url_checks::H1, check.h1)
            .value(url_checks::TITLE, check.title)
            .value(url_checks::DESCRIPTION, check.description)
            .returning(&[url_checks::ID]);

        let mut session = self.db.open().await?;
        let result = insert_returning_id(&mut session, &query).await;
        let id = session.finish(result).await?;

        tracing::info!(url_id, check_id = id, "The URL check has been added to the database");
        Ok(id)
    }

    async fn get_url_checks(&self, url_id: i64) -> Result<Vec<Check>, StorageError> {
        let query = SelectQuery::new(
            Table::UrlChecks,
            &[
                url_checks::ID,
                url_checks::URL_ID,
                url_checks::STATUS_CODE,
                url_checks::H1,
                url_checks::TITLE,
                url_checks::DESCRIPTION,
                url_checks::CREATED_AT,
            ],
        )
        .filter(url_checks::URL_ID, url_id)
        .order_by(url_checks::CREATED_AT, Direction::Desc)
        .order_by(url_checks::ID, Direction::Desc);

        let mut session = self.db.open().await?;
        let result = session.select_as::<CheckRow>(&query).await;
        let rows = session.finish(result).await?;

        Ok(rows.into_iter().map(Check::from).collect())
    }
}

async fn insert_url(session: &mut Session, name: &str) -> Result<i64, StorageError> {
    let query = InsertQuery::new(Table::Urls)
        .value(urls::NAME, name)
        .returning(&[urls::ID]);

    insert_returning_id(session, &query).await
}

async fn insert_returning_id(
    session: &mut Session,
    query: &InsertQuery,
) -> Result<i64, StorageError> {
    let row = session
        .insert(query)
        .await?
        .and_then(|rows| rows.into_iter().next())
        .ok_or(StorageError::MissingReturning)?;

    Ok(row.try_get::<i64, _>(0)?)
}

/// Selects all Urls (newest first) and the latest check of every checked Url.
async fn select_listing_parts(
    session: &mut Session,
) -> Result<(Vec<UrlNameRow>, Vec<LatestCheckRow>), StorageError> {
    let urls_query = SelectQuery::new(Table::Urls, &[urls::ID, urls::NAME])
        .order_by(urls::CREATED_AT, Direction::Desc)
        .order_by(urls::ID, Direction::Desc);

    let checks_query = SelectQuery::new(
        Table::UrlChecks,
        &[
            url_checks::CREATED_AT,
            url_checks::STATUS_CODE,
            url_checks::URL_ID,
        ],
    )
    .distinct_on(url_checks::URL_ID)
    .order_by(url_checks::URL_ID, Direction::Asc)
    .order_by(url_checks::CREATED_AT, Direction::Desc)
    .order_by(url_checks::ID, Direction::Desc);

    let urls = session.select_as::<UrlNameRow>(&urls_query).await?;
    let checks = session.select_as::<LatestCheckRow>(&checks_query).await?;

    Ok((urls, checks))
}

/// Pairs every Url with the first check of its `url_id` run.
///
/// `checks` must be ordered so that the most recent check of each Url comes
/// first within its run; later rows for the same Url are ignored.
fn merge_latest_checks(urls: Vec<UrlNameRow>, checks: Vec<LatestCheckRow>) -> Vec<UrlListing> {
    let mut latest: HashMap<i64, LatestCheckRow> = HashMap::with_capacity(checks.len());
    for check in checks {
        latest.entry(check.url_id).or_insert(check);
    }

    urls.into_iter()
        .map(|url| {
            let check = latest.get(&url.id);
            UrlListing {
                id: url.id,
                name: url.name,
                last_check_at: check.map(|c| c.created_at),
                last_status_code: check.and_then(|c| c.status_code),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(seconds)
    }

    fn url_row(id: i64) -> UrlNameRow {
        UrlNameRow {
            id,
            name: format!("https://site{id}.example.com"),
        }
    }

    fn check_row(url_id: i64, seconds: i64, status: i32) -> LatestCheckRow {
        LatestCheckRow {
            created_at: at(seconds),
            status_code: Some(status),
            url_id,
        }
    }

    #[test]
    fn test_merge_picks_first_check_of_each_run() {
        let urls = vec![url_row(2), url_row(1)];
        let checks = vec![
            check_row(1, 1, 200),
            check_row(2, 3, 500),
            check_row(2, 2, 404),
        ];

        let listing = merge_latest_checks(urls, checks);

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, 2);
        assert_eq!(listing[0].last_check_at, Some(at(3)));
        assert_eq!(listing[0].last_status_code, Some(500));
        assert_eq!(listing[1].id, 1);
        assert_eq!(listing[1].last_check_at, Some(at(1)));
    }

    #[test]
    fn test_merge_unchecked_url_has_no_check_fields() {
        let listing = merge_latest_checks(vec![url_row(7)], vec![check_row(8, 1, 200)]);

        assert_eq!(listing.len(), 1);
        assert!(listing[0].last_check_at.is_none());
        assert!(listing[0].last_status_code.is_none());
    }

    #[test]
    fn test_merge_keeps_url_order() {
        let listing = merge_latest_checks(vec![url_row(3), url_row(1), url_row(2)], vec![]);

        let ids: Vec<i64> = listing.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
