//! Guestbook entries.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Fields, DATE_FORMAT};
use crate::notion::types::{Page, Properties, PropertyValue};

/// Title property holding the visitor's name.
pub const NAME_PROPERTY: &str = "Name";
/// Rich text property holding the message.
pub const MESSAGE_PROPERTY: &str = "Message";
/// Date property holding the signing date.
pub const DATE_PROPERTY: &str = "Date";

/// A signed guestbook entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestbookEntry {
    /// Store-assigned id.
    pub id: String,
    /// Visitor name.
    pub name: String,
    /// Visitor message.
    pub message: String,
    /// `YYYY-MM-DD`, or empty when the row has no date.
    pub date: String,
}

impl From<&Page> for GuestbookEntry {
    fn from(page: &Page) -> Self {
        let fields = Fields::new(page);
        Self {
            id: page.id.clone(),
            name: fields.title(NAME_PROPERTY),
            message: fields.rich_text(MESSAGE_PROPERTY),
            date: fields.date(DATE_PROPERTY),
        }
    }
}

/// A validated entry about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Visitor name, non-empty.
    pub name: String,
    /// Visitor message, non-empty.
    pub message: String,
    /// Signing date.
    pub date: NaiveDate,
}

impl NewEntry {
    /// Property values for creating the row.
    #[must_use]
    pub fn properties(&self) -> Properties {
        let mut properties = Properties::new();
        properties.insert(NAME_PROPERTY.to_owned(), PropertyValue::title(&self.name));
        properties.insert(
            MESSAGE_PROPERTY.to_owned(),
            PropertyValue::rich_text(&self.message),
        );
        properties.insert(
            DATE_PROPERTY.to_owned(),
            PropertyValue::date(&self.formatted_date()),
        );
        properties
    }

    /// The entry as stored under the store-assigned `id`.
    #[must_use]
    pub fn into_entry(self, id: String) -> GuestbookEntry {
        let date = self.formatted_date();
        GuestbookEntry {
            id,
            name: self.name,
            message: self.message,
            date,
        }
    }

    /// Date as `YYYY-MM-DD`.
    fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Resolve a requested signing date against `today`.
///
/// A missing or empty request means today. A request that is not a valid
/// `YYYY-MM-DD` date also falls back to today, without reporting an error.
#[must_use]
pub fn resolve_date(requested: Option<&str>, today: NaiveDate) -> NaiveDate {
    match requested {
        None | Some("") => today,
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            // chrono accepts unpadded fields, signs and leading blanks; only
            // the canonical spelling counts.
            .filter(|date| date.format(DATE_FORMAT).to_string() == raw)
            .unwrap_or_else(|| {
                tracing::warn!("Unparsable entry date '{raw}', using {today}");
                today
            }),
    }
}
