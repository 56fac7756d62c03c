use actix_http::body::MessageBody;
use actix_http::Request;
use actix_service::Service;
use actix_web::{dev::ServiceResponse, test, Error};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use savepoint::notion::types::{Page, Properties, QueryRequest};
use savepoint::notion::Database;
use savepoint::server::api::state::App as AppState;
use savepoint::server::app::init_app;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// In-memory stand-in for a Notion database.
#[derive(Default)]
pub struct FakeDatabase {
    pub rows: Mutex<Vec<Page>>,
    pub queries: Mutex<Vec<QueryRequest>>,
    pub created: Mutex<Vec<Properties>>,
    pub failing: bool,
}

impl FakeDatabase {
    pub fn with_rows(rows: Vec<Value>) -> Arc<Self> {
        let rows = rows
            .into_iter()
            .map(|row| serde_json::from_value(row).unwrap())
            .collect();
        Arc::new(Self {
            rows: Mutex::new(rows),
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Self::default()
        })
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn query(&self, request: QueryRequest) -> anyhow::Result<Vec<Page>> {
        self.queries.lock().unwrap().push(request);
        if self.failing {
            anyhow::bail!("Notion API returned 401 Unauthorized");
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, properties: Properties) -> anyhow::Result<Page> {
        if self.failing {
            anyhow::bail!("Notion API returned 429 Too Many Requests");
        }
        let mut created = self.created.lock().unwrap();
        created.push(properties);
        Ok(Page {
            id: format!("generated-{}", created.len()),
            ..Page::default()
        })
    }
}

pub fn page(id: &str, properties: Value) -> Value {
    json!({"object": "page", "id": id, "properties": properties})
}

pub async fn initialize_app(
    guestbook: Arc<FakeDatabase>,
    projects: Option<Arc<FakeDatabase>>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let state = AppState::new(
        guestbook,
        projects.map(|db| db as Arc<dyn Database>),
    );
    let app = init_app(&state, &[ALLOWED_ORIGIN.to_owned()]);
    test::init_service(app).await
}

pub fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}
