//! Client for the Notion REST API.
//!
//! Only three calls are needed: query a database, create a page in a
//! database, and fetch a database's schema. Each configured database is
//! exposed to the rest of the crate through the [`Database`] trait, so the
//! HTTP layer can be exercised against an in-memory store.
use std::time;

use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::{header, StatusCode};

pub mod types;

use types::{
    CreatePageRequest, DatabaseSchema, ErrorBody, Page, Parent, Properties, QueryRequest,
    QueryResponse,
};

/// Default base URL of the Notion API.
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
/// API version the wire types are written against.
pub const NOTION_VERSION: &str = "2022-06-28";
/// Largest page size the query endpoint accepts.
const MAX_PAGE_SIZE: u8 = 100;
/// Outbound request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait]
/// A collection of rows in the external store.
pub trait Database: Send + Sync {
    /// Fetch every row matching `request`, following pagination.
    ///
    /// # Errors
    /// Errors if any page of results cannot be fetched or decoded.
    async fn query(&self, request: QueryRequest) -> anyhow::Result<Vec<Page>>;

    /// Create a row with the given property values and return it as stored.
    ///
    /// # Errors
    /// Errors if the store rejects the row or cannot be reached.
    async fn create(&self, properties: Properties) -> anyhow::Result<Page>;
}

/// An authenticated Notion API client.
#[derive(Debug, Clone)]
pub struct Client {
    /// Underlying HTTP client, carrying the auth and version headers.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl Client {
    /// Build a client for `base_url` authenticated with `token`.
    ///
    /// # Errors
    /// Errors if the token is not a valid header value or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .context("Notion token contains characters not allowed in a header")?;
        auth_value.set_sensitive(true);
        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Unable to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch one page of query results.
    ///
    /// # Errors
    /// Errors on transport failure, a non-2xx status, or an undecodable body.
    #[tracing::instrument(skip(self, request))]
    pub async fn query_database(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> anyhow::Result<QueryResponse> {
        let url = format!("{}/databases/{database_id}/query", self.base_url);
        let response = self.http.post(url).json(request).send().await?;
        decode(response).await
    }

    /// Create a page inside a database.
    ///
    /// # Errors
    /// Errors on transport failure, a non-2xx status, or an undecodable body.
    #[tracing::instrument(skip(self, properties))]
    pub async fn create_page(
        &self,
        database_id: &str,
        properties: &Properties,
    ) -> anyhow::Result<Page> {
        let url = format!("{}/pages", self.base_url);
        let body = CreatePageRequest {
            parent: Parent {
                database_id: database_id.to_owned(),
            },
            properties,
        };
        let response = self.http.post(url).json(&body).send().await?;
        decode(response).await
    }

    /// Retrieve a database's schema.
    ///
    /// # Errors
    /// Errors on transport failure, a non-2xx status, or an undecodable body.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve_database(&self, database_id: &str) -> anyhow::Result<DatabaseSchema> {
        let url = format!("{}/databases/{database_id}", self.base_url);
        let response = self.http.get(url).send().await?;
        decode(response).await
    }
}

/// Decode a JSON body, turning non-2xx statuses into errors carrying
/// Notion's own error message when it sent one.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Unable to decode Notion response");
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!(api_error_message(status, &body))
}

/// Human readable summary of a failed API call.
fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if !err.message.is_empty() => {
            format!("Notion API returned {status} ({}): {}", err.code, err.message)
        }
        Ok(_) | Err(_) => format!("Notion API returned {status}"),
    }
}

/// A single Notion database reached through a shared [`Client`].
#[derive(Debug, Clone)]
pub struct NotionDatabase {
    /// API client.
    client: Client,
    /// Database id.
    id: String,
}

impl NotionDatabase {
    /// Bind `client` to the database `id`.
    #[must_use]
    pub const fn new(client: Client, id: String) -> Self {
        Self { client, id }
    }

    /// Id of the bound database.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Retrieve the bound database's schema.
    ///
    /// # Errors
    /// See [`Client::retrieve_database`].
    pub async fn schema(&self) -> anyhow::Result<DatabaseSchema> {
        self.client.retrieve_database(&self.id).await
    }
}

#[async_trait]
impl Database for NotionDatabase {
    async fn query(&self, mut request: QueryRequest) -> anyhow::Result<Vec<Page>> {
        if request.page_size.is_none() {
            request.page_size = Some(MAX_PAGE_SIZE);
        }
        let mut rows = vec![];
        loop {
            let response = self.client.query_database(&self.id, &request).await?;
            rows.extend(
                response
                    .results
                    .into_iter()
                    .filter_map(|row| match Page::from_value(row) {
                        Ok(page) => Some(page),
                        Err(err) => {
                            tracing::warn!("Skipping unreadable row in database {}: {err}", self.id);
                            None
                        }
                    }),
            );
            match response.next_cursor {
                Some(cursor) if response.has_more => request.start_cursor = Some(cursor),
                Some(_) | None => break,
            }
        }
        tracing::debug!("Fetched {} rows from database {}", rows.len(), self.id);
        Ok(rows)
    }

    async fn create(&self, properties: Properties) -> anyhow::Result<Page> {
        self.client.create_page(&self.id, &properties).await
    }
}
