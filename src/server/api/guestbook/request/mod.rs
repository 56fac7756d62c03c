//! Request body for signing the guestbook and its validation.
use chrono::NaiveDate;
use serde::Deserialize;

use crate::records::guestbook::{resolve_date, NewEntry};
use crate::server::errors::HTTPError;

/// Body of a guestbook write.
#[derive(Debug, Deserialize, Default)]
pub struct NewEntryRequest {
    /// Visitor name. A missing key reads as empty and fails validation.
    #[serde(default)]
    pub name: String,
    /// Visitor message. A missing key reads as empty and fails validation.
    #[serde(default)]
    pub message: String,
    /// `YYYY-MM-DD`. Defaults to today; unparsable values also mean today.
    #[serde(default)]
    pub date: Option<String>,
}

impl NewEntryRequest {
    /// Validate the request and resolve its date against `today`.
    ///
    /// # Errors
    /// Errors with a bad request if `name` or `message` is empty.
    pub fn validate(self, today: NaiveDate) -> Result<NewEntry, HTTPError> {
        if self.name.is_empty() || self.message.is_empty() {
            return Err(HTTPError::BadRequest(
                "Name and message are required".to_owned(),
            ));
        }
        let date = resolve_date(self.date.as_deref(), today);
        Ok(NewEntry {
            name: self.name,
            message: self.message,
            date,
        })
    }
}
