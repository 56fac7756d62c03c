//! Cross-origin policy for the browser frontend.
use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::parse_origin;

/// How long browsers may cache a preflight response, in seconds.
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for the given allow-listed origins.
///
/// Methods are limited to `GET`, `POST` and `OPTIONS`, the only request
/// header accepted is `Content-Type`, and credentials are allowed. Origins
/// that are not a plain `scheme://host[:port]` are skipped, since
/// `Cors::allowed_origin` panics on them when the middleware starts.
#[must_use]
pub fn build(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .filter_map(|origin| {
            let parsed = parse_origin(origin);
            if parsed.is_none() {
                tracing::warn!("Skipping invalid CORS origin '{origin}'");
            }
            parsed
        })
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(&origin))
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_header(header::CONTENT_TYPE)
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
