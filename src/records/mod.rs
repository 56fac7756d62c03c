//! Flat records served to the frontend, and the mapping from Notion rows.
//!
//! Every accessor on [`Fields`] is total: a property that is missing, or
//! that holds a different kind than the field expects, reads as the field's
//! zero value. A single odd row therefore never fails a whole listing.
use chrono::{DateTime, NaiveDate};

use crate::notion::types::{Page, Property};

pub mod guestbook;
pub mod project;

pub use guestbook::GuestbookEntry;
pub use project::{Project, Stats};

/// Calendar date format used on both sides of the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed, name-based access to a row's properties.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'page> {
    /// Row being read.
    page: &'page Page,
}

impl<'page> Fields<'page> {
    /// Read fields out of `page`.
    #[must_use]
    pub const fn new(page: &'page Page) -> Self {
        Self { page }
    }

    /// Property called `name`, if the row has one.
    fn get(&self, name: &str) -> Option<&'page Property> {
        self.page.properties.get(name)
    }

    /// First text segment of a title property.
    #[must_use]
    pub fn title(&self, name: &str) -> String {
        match self.get(name) {
            Some(Property::Title { title }) => first_plain_text(title),
            _ => String::new(),
        }
    }

    /// First text segment of a rich text property.
    #[must_use]
    pub fn rich_text(&self, name: &str) -> String {
        match self.get(name) {
            Some(Property::RichText { rich_text }) => first_plain_text(rich_text),
            _ => String::new(),
        }
    }

    /// Option names of a multi-select property, in store order.
    #[must_use]
    pub fn multi_select(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(Property::MultiSelect { multi_select }) => multi_select
                .iter()
                .map(|option| option.name.clone())
                .collect(),
            _ => vec![],
        }
    }

    /// A number property truncated toward zero.
    #[must_use]
    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        reason = "Truncation is the intended conversion; `as` saturates and maps NaN to 0"
    )]
    pub fn integer(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(Property::Number {
                number: Some(number),
            }) => number.trunc() as i64,
            _ => 0,
        }
    }

    /// A URL property.
    #[must_use]
    pub fn url(&self, name: &str) -> String {
        match self.get(name) {
            Some(Property::Url { url: Some(url) }) => url.clone(),
            _ => String::new(),
        }
    }

    /// URL of the first reference in a files property.
    #[must_use]
    pub fn first_file_url(&self, name: &str) -> String {
        match self.get(name) {
            Some(Property::Files { files }) => files
                .first()
                .map(|file| file.url().to_owned())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Start of a date property as `YYYY-MM-DD`.
    #[must_use]
    pub fn date(&self, name: &str) -> String {
        match self.get(name) {
            Some(Property::Date { date: Some(date) }) => date
                .start
                .as_deref()
                .and_then(parse_start)
                .map(|start| start.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Plain text of the first segment, or empty.
fn first_plain_text(segments: &[crate::notion::types::RichText]) -> String {
    segments
        .first()
        .map(|segment| segment.plain_text.clone())
        .unwrap_or_default()
}

/// Parse a Notion date `start`, which is either a bare date or an RFC 3339
/// datetime. A datetime keeps the calendar date of its own offset.
fn parse_start(start: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(start, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(start)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}
