use crate::common::{self, body_json, page, FakeDatabase};
use actix_web::{http::StatusCode, test};
use chrono::Local;
use serde_json::json;
use std::sync::Arc;

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[actix_web::test]
async fn test_list_entries_when_collection_empty_expect_empty_array() {
    let app = common::initialize_app(FakeDatabase::with_rows(vec![]), None).await;
    let req = test::TestRequest::get().uri("/api/guestbook").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body_json(&body), json!([]));
}

#[actix_web::test]
async fn test_list_entries_expect_flattened_rows_and_no_sort() {
    let db = FakeDatabase::with_rows(vec![
        page(
            "e-1",
            json!({
                "Name": {"type": "title", "title": [{"plain_text": "Ada"}]},
                "Message": {"type": "rich_text", "rich_text": [{"plain_text": "Hi!"}]},
                "Date": {"type": "date", "date": {"start": "2024-01-05"}}
            }),
        ),
        page(
            "e-2",
            json!({
                "Name": {"type": "rich_text", "rich_text": [{"plain_text": "wrong kind"}]},
                "Date": {"type": "date", "date": null}
            }),
        ),
    ]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    let req = test::TestRequest::get().uri("/api/guestbook").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let actual = body_json(&test::read_body(resp).await);
    let expected = json!([
        {"id": "e-1", "name": "Ada", "message": "Hi!", "date": "2024-01-05"},
        {"id": "e-2", "name": "", "message": "", "date": ""}
    ]);
    assert_eq!(actual, expected);
    let queries = db.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].sorts.is_empty());
}

#[actix_web::test]
async fn test_list_entries_when_row_malformed_expect_good_rows_returned() {
    let db = FakeDatabase::with_rows(vec![
        json!({"object": "page", "properties": {
            "Name": {"type": "title", "title": [{"plain_text": "No id"}]}
        }}),
        page(
            "e-bad",
            json!({
                "Name": {"type": "title", "title": "not a list"},
                "Date": {"type": "date", "date": {"start": 20240105}}
            }),
        ),
        page(
            "e-good",
            json!({
                "Name": {"type": "title", "title": [{"plain_text": "Grace"}]},
                "Message": {"type": "rich_text", "rich_text": [{"plain_text": "Hello"}]},
                "Date": {"type": "date", "date": {"start": "2024-03-09"}}
            }),
        ),
    ]);
    let app = common::initialize_app(db, None).await;
    let req = test::TestRequest::get().uri("/api/guestbook").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let actual = body_json(&test::read_body(resp).await);
    let expected = json!([
        {"id": "e-bad", "name": "", "message": "", "date": ""},
        {"id": "e-good", "name": "Grace", "message": "Hello", "date": "2024-03-09"}
    ]);
    assert_eq!(actual, expected);
}

#[actix_web::test]
async fn test_list_entries_when_store_fails_expect_generic_server_error() {
    let app = common::initialize_app(FakeDatabase::failing(), None).await;
    let req = test::TestRequest::get().uri("/api/guestbook").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Failed to fetch entries");
}

#[actix_web::test]
async fn test_create_entry_with_date_expect_created_with_same_date() {
    let db = FakeDatabase::with_rows(vec![]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    let req = test::TestRequest::post()
        .uri("/api/guestbook")
        .set_json(json!({"name": "Ada", "message": "Hi!", "date": "2024-01-05"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let actual = body_json(&test::read_body(resp).await);
    let expected = json!({"id": "generated-1", "name": "Ada", "message": "Hi!", "date": "2024-01-05"});
    assert_eq!(actual, expected);

    let created = db.created.lock().unwrap();
    let stored = serde_json::to_value(&created[0]).unwrap();
    assert_eq!(stored["Date"], json!({"date": {"start": "2024-01-05"}}));
    assert_eq!(stored["Name"], json!({"title": [{"text": {"content": "Ada"}}]}));
    assert_eq!(
        stored["Message"],
        json!({"rich_text": [{"text": {"content": "Hi!"}}]})
    );
}

#[actix_web::test]
async fn test_create_entry_without_date_expect_today() {
    let db = FakeDatabase::with_rows(vec![]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    let req = test::TestRequest::post()
        .uri("/api/guestbook")
        .set_json(json!({"name": "Ada", "message": "Hi!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let actual = body_json(&test::read_body(resp).await);
    assert_eq!(actual["date"], json!(today()));
}

#[actix_web::test]
async fn test_create_entry_with_unparsable_date_expect_today_without_error() {
    let db = FakeDatabase::with_rows(vec![]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    let req = test::TestRequest::post()
        .uri("/api/guestbook")
        .set_json(json!({"name": "Ada", "message": "Hi!", "date": "Jan 5th"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let actual = body_json(&test::read_body(resp).await);
    assert_eq!(actual["date"], json!(today()));
    assert_eq!(db.created_count(), 1);
}

#[actix_web::test]
async fn test_create_entry_when_name_or_message_empty_expect_bad_request_and_no_write() {
    let db = FakeDatabase::with_rows(vec![]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    for body in [
        json!({"name": "", "message": "Hi!"}),
        json!({"name": "Ada", "message": ""}),
        json!({"message": "Hi!"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/guestbook")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(resp).await;
        assert_eq!(body, "Name and message are required");
    }
    assert_eq!(db.created_count(), 0);
}

#[actix_web::test]
async fn test_create_entry_when_body_malformed_expect_bad_request() {
    let db = FakeDatabase::with_rows(vec![]);
    let app = common::initialize_app(Arc::clone(&db), None).await;
    let req = test::TestRequest::post()
        .uri("/api/guestbook")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": \"Ada\",")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid request body");
    assert_eq!(db.created_count(), 0);
}

#[actix_web::test]
async fn test_create_entry_when_store_fails_expect_server_error() {
    let app = common::initialize_app(FakeDatabase::failing(), None).await;
    let req = test::TestRequest::post()
        .uri("/api/guestbook")
        .set_json(json!({"name": "Ada", "message": "Hi!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Failed to save entry");
}

#[actix_web::test]
async fn test_guestbook_when_unsupported_method_expect_method_not_allowed() {
    let app = common::initialize_app(FakeDatabase::with_rows(vec![]), None).await;
    let req = test::TestRequest::delete().uri("/api/guestbook").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
