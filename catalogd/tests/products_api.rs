//! HTTP-level tests for the product endpoints.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_domain::Product;
use catalog_store::MemoryStore;
use catalogd::api::{ErrorResponse, CURSOR_HEADER};
use catalogd::{create_router, ApiState, ProductService};

fn app_with_timeout(timeout: Duration) -> Router {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(ProductService::new(store, timeout));
    create_router(Arc::new(ApiState { products: service }))
}

fn app() -> Router {
    app_with_timeout(Duration::from_secs(2))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    fn cursor(&self) -> String {
        self.headers
            .get(CURSOR_HEADER)
            .expect("X-Cursor header present")
            .to_str()
            .unwrap()
            .to_string()
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Page URI with the query string form-encoded, since cursors are base64.
fn page_uri(num: usize, cursor: &str) -> String {
    let mut url = reqwest::Url::parse("http://localhost/products").unwrap();
    url.query_pairs_mut()
        .append_pair("num", &num.to_string())
        .append_pair("cursor", cursor);
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

async fn create(app: &Router, title: &str, content: &str) -> Product {
    let response = send(
        app,
        "POST",
        "/products",
        Some(json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let created = create(&app, "Teapot", "Cast iron").await;
    assert_eq!(created.id, 1);

    let response = send(&app, "GET", &format!("/products/{}", created.id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let fetched: Product = response.json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_title_is_conflict() {
    let app = app();
    create(&app, "A", "first").await;

    let response = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "title": "A", "content": "second" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let listed = send(&app, "GET", "/products", None).await;
    let items: Vec<Product> = listed.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "first");
}

#[tokio::test]
async fn test_create_requires_title_and_content() {
    let app = app();

    let response = send(&app, "POST", "/products", Some(json!({ "content": "x" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let err: ErrorResponse = response.json();
    assert!(err.error.contains("title"));

    let response = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "title": "x", "content": "" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_follows_cursor() {
    let app = app();
    for i in 1..=5 {
        create(&app, &format!("item-{}", i), "c").await;
    }

    let first = send(&app, "GET", "/products?num=2", None).await;
    assert_eq!(first.status, StatusCode::OK);
    let items: Vec<Product> = first.json();
    assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    let cursor = first.cursor();
    assert!(!cursor.is_empty());

    let second = send(&app, "GET", &page_uri(2, &cursor), None).await;
    let items: Vec<Product> = second.json();
    assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 4]);
    let cursor = second.cursor();
    assert!(!cursor.is_empty());

    let third = send(&app, "GET", &page_uri(2, &cursor), None).await;
    let items: Vec<Product> = third.json();
    assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);
    assert_eq!(third.cursor(), "");
}

#[tokio::test]
async fn test_cursor_with_padding_survives_query_encoding() {
    let app = app();
    for i in 1..=3 {
        create(&app, &format!("item-{}", i), "c").await;
    }

    // Every cursor ends in '=' padding, which must not be read as a separator
    let cursor = catalog_store::encode_cursor(1);
    assert!(cursor.ends_with('='));

    let response = send(&app, "GET", &page_uri(5, &cursor), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let items: Vec<Product> = response.json();
    assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
}

#[tokio::test]
async fn test_default_page_size() {
    let app = app();
    for i in 0..11 {
        create(&app, &format!("item-{}", i), "c").await;
    }

    let response = send(&app, "GET", "/products", None).await;
    let items: Vec<Product> = response.json();
    assert_eq!(items.len(), 10);
    assert!(!response.cursor().is_empty());
}

#[tokio::test]
async fn test_bad_cursor_and_num() {
    let app = app();
    create(&app, "A", "c").await;

    let response = send(&app, "GET", "/products?cursor=%25%25%25", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/products?num=-3", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/products?num=lots", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product() {
    let app = app();
    let created = create(&app, "Lamp", "plain").await;

    let response = send(
        &app,
        "POST",
        &format!("/products/{}", created.id),
        Some(json!({ "title": "Lamp", "content": "with shade" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let updated: Product = response.json();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.content, "with shade");
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let app = app();
    let response = send(
        &app,
        "POST",
        "/products/41",
        Some(json!({ "title": "Lamp", "content": "c" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let app = app();
    let created = create(&app, "Chair", "oak").await;
    let uri = format!("/products/{}", created.id);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Ids are never handed out twice
    let next = create(&app, "Chair", "walnut").await;
    assert_eq!(next.id, created.id + 1);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = app();
    let response = send(&app, "GET", "/products/abc", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/products/abc", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_deadline_is_gateway_timeout() {
    let app = app_with_timeout(Duration::ZERO);

    let response = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "title": "A", "content": "c" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_cors_headers() {
    let app = app();
    let request = Request::builder()
        .method("GET")
        .uri("/products")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
