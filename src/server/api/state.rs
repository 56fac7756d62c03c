//! Centralized state management for the Actix web server
use std::{fmt, sync::Arc};

use crate::{
    config::Config,
    notion::{Client, Database, NotionDatabase},
};

/// Application state, shared read-only between workers.
#[derive(Clone)]
pub struct App {
    /// Guestbook database
    pub guestbook: Arc<dyn Database>,
    /// Projects database, `None` when not configured
    pub projects: Option<Arc<dyn Database>>,
}

impl App {
    /// Wrap already constructed databases.
    #[must_use]
    pub fn new(guestbook: Arc<dyn Database>, projects: Option<Arc<dyn Database>>) -> Self {
        Self {
            guestbook,
            projects,
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "App with guestbook and {} projects",
            if self.projects.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        )
    }
}

/// Notion-backed databases built from config.
#[derive(Debug, Clone)]
pub struct Databases {
    /// Guestbook database
    pub guestbook: NotionDatabase,
    /// Projects database, if configured
    pub projects: Option<NotionDatabase>,
}

impl Databases {
    /// Construct one independent client per configured database.
    ///
    /// # Errors
    /// Will error if a client cannot be constructed from its credentials
    pub fn init(config: &Config) -> anyhow::Result<Self> {
        let guestbook = NotionDatabase::new(
            Client::new(&config.api_url, &config.guestbook.token)?,
            config.guestbook.database_id.clone(),
        );
        let projects = config
            .projects
            .as_ref()
            .map(|credentials| {
                Ok::<NotionDatabase, anyhow::Error>(NotionDatabase::new(
                    Client::new(&config.api_url, &credentials.token)?,
                    credentials.database_id.clone(),
                ))
            })
            .transpose()?;
        Ok(Self {
            guestbook,
            projects,
        })
    }

    /// Application state handing out the databases as trait objects.
    #[must_use]
    pub fn into_state(self) -> App {
        App::new(
            Arc::new(self.guestbook),
            self.projects
                .map(|projects| Arc::new(projects) as Arc<dyn Database>),
        )
    }
}
