//! Liveness check.
use actix_web::HttpResponse;

/// Always `200 OK`.
#[expect(clippy::unused_async, reason = "Actix handlers are async")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}
