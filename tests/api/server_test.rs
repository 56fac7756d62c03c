use crate::common::{self, FakeDatabase, ALLOWED_ORIGIN};
use actix_web::{
    http::{header, StatusCode},
    test,
};

#[actix_web::test]
async fn test_health_expect_ok() {
    let app = common::initialize_app(FakeDatabase::failing(), None).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_unknown_path_expect_not_found() {
    let app = common::initialize_app(FakeDatabase::with_rows(vec![]), None).await;
    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_preflight_from_allowed_origin_expect_cors_headers() {
    let app = common::initialize_app(FakeDatabase::with_rows(vec![]), None).await;
    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/guestbook")
        .insert_header((header::ORIGIN, ALLOWED_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|value| value.to_str().ok()),
        Some("true")
    );
}

#[actix_web::test]
async fn test_get_from_allowed_origin_expect_allow_origin_header() {
    let app = common::initialize_app(FakeDatabase::with_rows(vec![]), None).await;
    let req = test::TestRequest::get()
        .uri("/api/guestbook")
        .insert_header((header::ORIGIN, ALLOWED_ORIGIN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}

#[actix_web::test]
async fn test_init_app_when_origin_invalid_expect_skipped_and_valid_origin_served() {
    let state = savepoint::server::api::state::App::new(FakeDatabase::with_rows(vec![]), None);
    let origins = vec![
        "https://exa mple.com".to_owned(),
        "*".to_owned(),
        ALLOWED_ORIGIN.to_owned(),
    ];
    let app = test::init_service(savepoint::server::app::init_app(&state, &origins)).await;
    let req = test::TestRequest::get()
        .uri("/api/guestbook")
        .insert_header((header::ORIGIN, ALLOWED_ORIGIN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}
