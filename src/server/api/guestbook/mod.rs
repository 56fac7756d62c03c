//! Handlers for reading and signing the guestbook.
use actix_web::{web, HttpResponse};
use chrono::Local;
use tracing_actix_web::RootSpan;

use crate::notion::types::QueryRequest;
use crate::records::GuestbookEntry;
use crate::server::errors::HTTPError;
use crate::server::tracing::upstream;

use super::state::App as AppState;

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// List every guestbook entry, in store order.
///
/// # Errors
/// Errors with a 500 if the guestbook database cannot be queried.
#[tracing::instrument(name = "Listing guestbook entries", skip(data, root_span))]
pub async fn list_entries(
    data: web::Data<AppState>,
    root_span: RootSpan,
) -> Result<HttpResponse, HTTPError> {
    let pages = upstream(&root_span, data.guestbook.query(QueryRequest::default()))
        .await
        .map_err(|err| {
            tracing::error!("Error querying guestbook database: {err:#}");
            HTTPError::InternalServerError("Failed to fetch entries".to_owned())
        })?;
    if let Some(first) = pages.first() {
        let mut keys: Vec<&str> = first.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        tracing::debug!("Available properties: {keys:?}");
    }
    let entries: Vec<GuestbookEntry> = pages
        .iter()
        .filter(|page| !page.id.is_empty())
        .map(GuestbookEntry::from)
        .collect();
    root_span.record("rows", entries.len());
    tracing::info!("Returned {} entries", entries.len());
    Ok(HttpResponse::Ok().json(entries))
}

/// Sign the guestbook.
///
/// # Errors
/// Errors with a 400 on an invalid body and a 500 if the row cannot be
/// created.
#[tracing::instrument(name = "Saving guestbook entry", skip(data, body, root_span))]
pub async fn create_entry(
    data: web::Data<AppState>,
    body: web::Json<request::NewEntryRequest>,
    root_span: RootSpan,
) -> Result<HttpResponse, HTTPError> {
    let entry = body.into_inner().validate(Local::now().date_naive())?;
    let page = upstream(&root_span, data.guestbook.create(entry.properties()))
        .await
        .map_err(|err| {
            tracing::error!("Error creating guestbook row: {err:#}");
            HTTPError::InternalServerError("Failed to save entry".to_owned())
        })?;
    let created = entry.into_entry(page.id);
    tracing::info!("Saved new entry: {} - {}", created.name, created.message);
    Ok(HttpResponse::Created().json(created))
}
