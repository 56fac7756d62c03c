//! Handler for listing portfolio projects.
use actix_web::{web, HttpResponse};
use tracing_actix_web::RootSpan;

use crate::notion::types::QueryRequest;
use crate::records::{project::NAME_PROPERTY, Project};
use crate::server::errors::HTTPError;
use crate::server::tracing::upstream;

use super::state::App as AppState;

/// List every project, sorted by name.
///
/// # Errors
/// Errors with a 503 when no projects database is configured, and a 500 if
/// the database cannot be queried.
#[tracing::instrument(name = "Listing projects", skip(data, root_span))]
pub async fn list_projects(
    data: web::Data<AppState>,
    root_span: RootSpan,
) -> Result<HttpResponse, HTTPError> {
    let Some(projects) = data.projects.as_ref() else {
        return Err(HTTPError::ServiceUnavailable(
            "Projects are not configured".to_owned(),
        ));
    };
    let pages = upstream(&root_span, projects.query(QueryRequest::sorted_by(NAME_PROPERTY)))
        .await
        .map_err(|err| {
            tracing::error!("Error querying projects database: {err:#}");
            HTTPError::InternalServerError("Failed to fetch projects".to_owned())
        })?;
    let projects: Vec<Project> = pages
        .iter()
        .filter(|page| !page.id.is_empty())
        .map(Project::from)
        .collect();
    root_span.record("rows", projects.len());
    tracing::info!("Returned {} projects", projects.len());
    Ok(HttpResponse::Ok().json(projects))
}
