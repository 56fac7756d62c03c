//! A central place to register App routes.
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error, HttpRequest,
};

use super::{
    guestbook::{create_entry, list_entries},
    health::health,
    projects::list_projects,
    state::App as AppState,
};
use crate::server::errors::HTTPError;

/// Central place to register all the App routing.
///
/// Each path answers its own methods and `405` for anything else.
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &AppState,
) -> App<V> {
    app.app_data(web::Data::new(state.clone()))
        .app_data(json_config())
        .service(
            web::resource("/api/guestbook")
                .route(web::get().to(list_entries))
                .route(web::post().to(create_entry))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/projects")
                .route(web::get().to(list_projects))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health")
                .route(web::get().to(health))
                .default_service(web::to(method_not_allowed)),
        )
}

/// JSON extractor settings: any body that fails to decode is a plain `400`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req: &HttpRequest| {
            tracing::debug!("Rejected request body: {err}");
            HTTPError::BadRequest("Invalid request body".to_owned()).into()
        })
}

/// Fallback for known paths hit with an unsupported method.
#[expect(clippy::unused_async, reason = "Actix handlers are async")]
async fn method_not_allowed() -> Result<&'static str, HTTPError> {
    Err(HTTPError::MethodNotAllowed)
}
