//! Page routing and static asset tests.

mod common;

use axum::http::{header, StatusCode};
use common::{text_body, TestApp, ABOUT_HTML, HOME_HTML, PETS_HTML};

#[tokio::test]
async fn root_serves_home_page() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(text_body(response).await, HOME_HTML);
}

#[tokio::test]
async fn fixed_route_serves_its_template() {
    let app = TestApp::spawn().await;

    let response = app.get("/pets").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, PETS_HTML);
}

#[tokio::test]
async fn fixed_route_without_template_falls_back_to_home() {
    let app = TestApp::spawn().await;

    let response = app.get("/donate").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, HOME_HTML);
}

#[tokio::test]
async fn arbitrary_page_with_template_is_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/about").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, ABOUT_HTML);
}

#[tokio::test]
async fn unknown_page_is_a_soft_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, HOME_HTML);
}

#[tokio::test]
async fn page_names_cannot_escape_template_dir() {
    let app = TestApp::spawn().await;

    let response = app.get("/..%2Fpets.db").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, HOME_HTML);
}

#[tokio::test]
async fn pages_carry_security_headers() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn static_files_are_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/style.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "body { margin: 0; }");
}

#[tokio::test]
async fn missing_static_file_is_a_real_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/images/nobody.webp").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
