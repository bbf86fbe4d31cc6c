#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use page_analyzer::domain::page_fetcher::{FetchError, FetchedPage, PageFetcher};
use page_analyzer::infrastructure::persistence::Database;
use page_analyzer::state::AppState;

pub const TEST_SECRET: &str = "test-secret-key";

pub fn create_database(pool: PgPool) -> Database {
    Database::new(pool, Duration::from_secs(5))
}

pub async fn create_test_url(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO urls (name, created_at) VALUES ($1, now()) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_check_at(
    pool: &PgPool,
    url_id: i64,
    status_code: i32,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_checks (url_id, status_code, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(url_id)
    .bind(status_code)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_checks(pool: &PgPool, url_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_checks WHERE url_id = $1")
        .bind(url_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Fetcher returning a fixed page, or failing when `page` is `None`.
pub struct StubFetcher {
    page: Option<FetchedPage>,
}

impl StubFetcher {
    pub fn ok(status_code: u16, body: &str) -> Self {
        Self {
            page: Some(FetchedPage {
                status_code,
                body: body.to_string(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.page.clone().ok_or_else(|| FetchError::Timeout {
            url: url.to_string(),
        })
    }
}

pub fn create_test_state(pool: PgPool, fetcher: StubFetcher) -> AppState {
    AppState::new(create_database(pool), Arc::new(fetcher), TEST_SECRET)
}
