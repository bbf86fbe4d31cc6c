mod common;

use chrono::{SubsecRound, Utc};
use sqlx::{PgPool, Row};
use page_analyzer::error::StorageError;
use page_analyzer::infrastructure::persistence::query::{
    Direction, InsertQuery, SelectQuery, Table, url_checks, urls,
};

#[sqlx::test]
async fn test_insert_then_select_round_trip(pool: PgPool) {
    let db = common::create_database(pool);
    let before = Utc::now().trunc_subsecs(6);

    let mut session = db.open().await.unwrap();
    let inserted = session
        .insert(
            &InsertQuery::new(Table::Urls)
                .value(urls::NAME, "https://example.com")
                .returning(&[urls::ID]),
        )
        .await
        .unwrap()
        .unwrap();
    let id: i64 = inserted[0].get(0);

    let rows = session
        .select(
            &SelectQuery::new(Table::Urls, &[urls::ID, urls::NAME, urls::CREATED_AT])
                .filter(urls::NAME, "https://example.com"),
        )
        .await
        .unwrap();
    session.close().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64, _>(0), id);
    assert_eq!(rows[0].get::<String, _>(1), "https://example.com");
    let created_at: chrono::DateTime<Utc> = rows[0].get(2);
    assert!(created_at >= before);
}

#[sqlx::test]
async fn test_insert_without_returning(pool: PgPool) {
    let db = common::create_database(pool.clone());

    let mut session = db.open().await.unwrap();
    let result = session
        .insert(&InsertQuery::new(Table::Urls).value(urls::NAME, "https://example.com"))
        .await
        .unwrap();
    session.close().await.unwrap();

    assert!(result.is_none());
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_rollback_discards_writes(pool: PgPool) {
    let db = common::create_database(pool.clone());

    let mut session = db.open().await.unwrap();
    session
        .insert(&InsertQuery::new(Table::Urls).value(urls::NAME, "https://example.com"))
        .await
        .unwrap();
    session.rollback().await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_finish_rolls_back_on_error(pool: PgPool) {
    let db = common::create_database(pool.clone());

    let mut session = db.open().await.unwrap();
    session
        .insert(&InsertQuery::new(Table::Urls).value(urls::NAME, "https://example.com"))
        .await
        .unwrap();
    let result: Result<(), StorageError> = Err(StorageError::MissingReturning);
    let finished = session.finish(result).await;

    assert!(matches!(finished, Err(StorageError::MissingReturning)));
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_filter_matching_nothing_is_empty(pool: PgPool) {
    let db = common::create_database(pool);

    let mut session = db.open().await.unwrap();
    let rows = session
        .select(&SelectQuery::new(Table::Urls, &[urls::ID]).filter(urls::NAME, "missing"))
        .await
        .unwrap();
    session.close().await.unwrap();

    assert!(rows.is_empty());
}

#[sqlx::test]
async fn test_left_join_keeps_unchecked_urls(pool: PgPool) {
    let checked = common::create_test_url(&pool, "https://checked.example").await;
    let unchecked = common::create_test_url(&pool, "https://unchecked.example").await;
    common::create_test_check_at(&pool, checked, 200, Utc::now()).await;

    let db = common::create_database(pool);
    let query = SelectQuery::new(Table::Urls, &[urls::ID, url_checks::STATUS_CODE])
        .left_join(url_checks::URL_ID, urls::ID)
        .order_by(urls::ID, Direction::Asc);

    let mut session = db.open().await.unwrap();
    let rows = session.select(&query).await.unwrap();
    session.close().await.unwrap();

    let pairs: Vec<(i64, Option<i32>)> = rows.iter().map(|r| (r.get(0), r.get(1))).collect();
    assert_eq!(pairs, vec![(checked, Some(200)), (unchecked, None)]);
}

#[sqlx::test]
async fn test_distinct_on_keeps_first_row_per_key(pool: PgPool) {
    let url_id = common::create_test_url(&pool, "https://example.com").await;
    let now = Utc::now();
    common::create_test_check_at(&pool, url_id, 500, now - chrono::Duration::minutes(5)).await;
    common::create_test_check_at(&pool, url_id, 200, now).await;

    let db = common::create_database(pool);
    let query = SelectQuery::new(
        Table::UrlChecks,
        &[url_checks::URL_ID, url_checks::STATUS_CODE],
    )
    .distinct_on(url_checks::URL_ID)
    .order_by(url_checks::URL_ID, Direction::Asc)
    .order_by(url_checks::CREATED_AT, Direction::Desc);

    let mut session = db.open().await.unwrap();
    let rows = session.select(&query).await.unwrap();
    session.close().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<Option<i32>, _>(1), Some(200));
}
