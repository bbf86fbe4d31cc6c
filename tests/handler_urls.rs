mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use sqlx::PgPool;
use page_analyzer::web::routes::routes;

fn server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool, common::StubFetcher::failing());
    TestServer::new(routes().with_state(state)).unwrap()
}

fn flash_cookie(response: &axum_test::TestResponse) -> String {
    let set_cookie = response.header(header::SET_COOKIE);
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[sqlx::test]
async fn test_index_page(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"action="/urls""#));
}

#[sqlx::test]
async fn test_create_url_redirects_with_flash(pool: PgPool) {
    let server = server(pool.clone());

    let response = server
        .post("/urls")
        .form(&[("url", "https://Example.com/some/page")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let id: i64 = sqlx::query_scalar("SELECT id FROM urls WHERE name = 'https://example.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(
        response.header(header::LOCATION),
        format!("/urls/{id}").as_str()
    );

    let cookie = flash_cookie(&response);
    let page = server
        .get(&format!("/urls/{id}"))
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    page.assert_status_ok();
    let html = page.text();
    assert!(html.contains("Page successfully added"));
    assert!(html.contains("https://example.com"));

    let cleared = page.header(header::SET_COOKIE);
    assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
}

#[sqlx::test]
async fn test_create_existing_url(pool: PgPool) {
    let id = common::create_test_url(&pool, "https://example.com").await;
    let server = server(pool);

    let response = server
        .post("/urls")
        .form(&[("url", "https://example.com/other")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header(header::LOCATION),
        format!("/urls/{id}").as_str()
    );

    let page = server
        .get(&format!("/urls/{id}"))
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&flash_cookie(&response)).unwrap(),
        )
        .await;
    assert!(page.text().contains("Page already exists"));
}

#[sqlx::test]
async fn test_create_invalid_url(pool: PgPool) {
    let server = server(pool.clone());

    let response = server.post("/urls").form(&[("url", "not a url")]).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("Invalid URL"));
    assert!(html.contains(r#"value="not a url""#));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_create_empty_url(pool: PgPool) {
    let server = server(pool);

    let response = server.post("/urls").form(&[("url", "")]).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("URL is required"));
}

#[sqlx::test]
async fn test_create_too_long_url(pool: PgPool) {
    let server = server(pool);
    let long = format!("https://example.com/{}", "a".repeat(300));

    let response = server.post("/urls").form(&[("url", long.as_str())]).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("URL exceeds 255 characters"));
}

#[sqlx::test]
async fn test_list_urls(pool: PgPool) {
    let id = common::create_test_url(&pool, "https://example.com").await;
    common::create_test_check_at(&pool, id, 200, chrono::Utc::now()).await;
    common::create_test_url(&pool, "https://unchecked.example").await;
    let server = server(pool);

    let response = server.get("/urls").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("https://example.com"));
    assert!(html.contains("https://unchecked.example"));
    assert!(html.contains("<td>200</td>"));
}

#[sqlx::test]
async fn test_show_unknown_url_is_404(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/urls/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page not found"));
}

#[sqlx::test]
async fn test_show_non_numeric_id_is_404(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/urls/abc").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("Page not found"));
    assert!(!html.contains("Invalid URL"));
}

#[sqlx::test]
async fn test_forged_flash_cookie_ignored(pool: PgPool) {
    let id = common::create_test_url(&pool, "https://example.com").await;
    let server = server(pool);

    let response = server
        .get(&format!("/urls/{id}"))
        .add_header(header::COOKIE, HeaderValue::from_static("flash=abc.def"))
        .await;

    response.assert_status_ok();
    assert!(!response.text().contains("alert-"));
}
