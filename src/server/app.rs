//! Serve the guestbook and projects API.
#![allow(
    clippy::exit,
    clippy::unused_async,
    clippy::module_name_repetitions
)]
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};

use std::{io, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;
use tracing_actix_web::TracingLogger;

use crate::config::Config;
use crate::notion::NotionDatabase;
use crate::server::api::routes;
use crate::server::api::state::{App as AppState, Databases};
use crate::server::cors;
use crate::server::tracing::SavepointRootSpanBuilder;

/// Serve the API on `bind:port` until the process is stopped.
#[actix_web::main]
pub async fn serve(config: Config, bind: &str, port: u16) -> io::Result<()> {
    let databases = Databases::init(&config).unwrap_or_else(|err| {
        tracing::error!("Unable to initialize Notion clients.");
        tracing::error!("Error: {:?}", err);
        process::exit(1);
    });
    tracing::info!("Notion client initialized successfully");
    log_schema(&databases.guestbook).await;

    let state = databases.into_state();
    let allowed_origins = config.allowed_origins;
    tracing::info!("Running Savepoint server on http://{bind}:{port}.");

    HttpServer::new(move || init_app(&state, &allowed_origins))
        .bind((bind, port))?
        .run()
        .await
}

/// Log the guestbook database's columns so schema drift shows up at boot.
/// Failure is not fatal; reads will simply come back with empty fields.
async fn log_schema(database: &NotionDatabase) {
    match database.schema().await {
        Ok(schema) => {
            let mut columns: Vec<String> = schema
                .properties
                .iter()
                .map(|(name, column)| format!("{name}({})", column.kind))
                .collect();
            columns.sort_unstable();
            tracing::info!(
                "Database {} connected. Available properties: {columns:?}",
                schema.id
            );
        }
        Err(err) => {
            tracing::error!(
                "Error retrieving database {}: {err:#}",
                database.id()
            );
        }
    }
}

/// Initialize the application and all routing.
///
/// Every request passes through request tracing and the CORS policy.
pub fn init_app(
    state: &AppState,
    allowed_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    routes::register_app(App::new(), state)
        .wrap(cors::build(allowed_origins))
        .wrap(TracingLogger::<SavepointRootSpanBuilder>::new())
}
