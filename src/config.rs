//! Environment driven configuration.
use std::env;

use crate::notion::DEFAULT_API_URL;

/// Origins allowed by CORS out of the box (local frontend dev servers).
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Credentials for a single Notion database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Integration token.
    pub token: String,
    /// Database id.
    pub database_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Guestbook database. Required.
    pub guestbook: Credentials,
    /// Projects database. `/api/projects` is disabled without it.
    pub projects: Option<Credentials>,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
    /// Notion API base URL.
    pub api_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Errors if `NOTION_TOKEN` or `NOTION_DATABASE_ID` is unset or empty.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Errors if `NOTION_TOKEN` or `NOTION_DATABASE_ID` is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (Some(token), Some(database_id)) = (var("NOTION_TOKEN"), var("NOTION_DATABASE_ID"))
        else {
            anyhow::bail!("NOTION_TOKEN and NOTION_DATABASE_ID must be set in environment variables");
        };
        let guestbook = Credentials { token, database_id };

        let projects = match (var("NOTION_PROJECTS_TOKEN"), var("NOTION_PROJECTS_DB_ID")) {
            (Some(token), Some(database_id)) => Some(Credentials { token, database_id }),
            _ => {
                tracing::warn!(
                    "NOTION_PROJECTS_TOKEN or NOTION_PROJECTS_DB_ID not set, /api/projects is disabled"
                );
                None
            }
        };

        let mut allowed_origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|origin| (*origin).to_owned())
            .collect();
        if let Some(extra) = var("CORS_ALLOWED_ORIGINS") {
            allowed_origins.extend(parse_origins(&extra));
        }

        let api_url = var("NOTION_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        url::Url::parse(&api_url)
            .map_err(|err| anyhow::anyhow!("Invalid NOTION_API_URL '{api_url}': {err}"))?;

        Ok(Self {
            guestbook,
            projects,
            allowed_origins,
            api_url,
        })
    }
}

/// Split a comma separated origin list, dropping blanks and invalid origins.
fn parse_origins(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| {
            let parsed = parse_origin(origin);
            if parsed.is_none() {
                tracing::warn!("Ignoring invalid CORS origin '{origin}'");
            }
            parsed
        })
}

/// Normalize a browser origin to `scheme://host[:port]`.
///
/// Returns `None` unless `raw` is an `http`/`https` URL with a host and no
/// path beyond `/`, query, fragment or credentials. The wildcard `*` is
/// rejected since credentials are allowed.
#[must_use]
pub fn parse_origin(raw: &str) -> Option<String> {
    let url = url::Url::parse(raw).ok()?;
    let plain = matches!(url.scheme(), "http" | "https")
        && url.host().is_some()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none();
    plain.then(|| url.origin().ascii_serialization())
}
