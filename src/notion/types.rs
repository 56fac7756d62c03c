//! Wire types for the subset of the Notion API used by the server.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A row in a Notion database.
///
/// Decoding is lenient: a missing id reads as empty, and a property whose
/// payload does not match its declared kind reads as
/// [`Property::Unsupported`] instead of failing the row.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(from = "RawPage")]
pub struct Page {
    /// Store-assigned page id.
    pub id: String,
    /// Typed properties, keyed by property name.
    pub properties: HashMap<String, Property>,
}

impl Page {
    /// Decode one row of a query result.
    ///
    /// # Errors
    /// Errors if the row is not an object or its id is not a string.
    pub fn from_value(row: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(row)
    }
}

/// A row as it comes off the wire, before its properties are typed.
#[derive(Deserialize)]
struct RawPage {
    /// Page id, if present.
    #[serde(default)]
    id: String,
    /// Untyped property payloads.
    #[serde(default)]
    properties: HashMap<String, serde_json::Value>,
}

impl From<RawPage> for Page {
    fn from(raw: RawPage) -> Self {
        let properties = raw
            .properties
            .into_iter()
            .map(|(name, value)| {
                let property = serde_json::from_value(value).unwrap_or_else(|err| {
                    tracing::debug!("Property '{name}' on row '{}' unreadable: {err}", raw.id);
                    Property::Unsupported
                });
                (name, property)
            })
            .collect();
        Self {
            id: raw.id,
            properties,
        }
    }
}

/// A typed property value as returned by the Notion API.
///
/// Only the kinds the server reads are modelled; everything else collapses
/// into [`Property::Unsupported`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    /// The database's title column.
    Title {
        /// Text segments.
        #[serde(default)]
        title: Vec<RichText>,
    },
    /// A rich text column.
    RichText {
        /// Text segments.
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    /// A multi-select column.
    MultiSelect {
        /// Selected options, in the order the store returns them.
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    /// A number column. Empty cells are `null`.
    Number {
        /// Numeric value.
        #[serde(default)]
        number: Option<f64>,
    },
    /// A URL column. Empty cells are `null`.
    Url {
        /// Link target.
        #[serde(default)]
        url: Option<String>,
    },
    /// A "files & media" column.
    Files {
        /// File references.
        #[serde(default)]
        files: Vec<FileRef>,
    },
    /// A date column. Empty cells are `null`.
    Date {
        /// Date range.
        #[serde(default)]
        date: Option<DateValue>,
    },
    /// Any property kind not listed above.
    #[serde(other)]
    Unsupported,
}

/// One segment of rich text.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RichText {
    /// Text content without annotations.
    #[serde(default)]
    pub plain_text: String,
}

/// A multi-select option.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    /// Option label.
    #[serde(default)]
    pub name: String,
}

/// A reference to a file, either linked from elsewhere or uploaded to Notion.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileRef {
    /// A file hosted outside Notion.
    External {
        /// Link object.
        external: FileLink,
    },
    /// A file uploaded to Notion. The URL is signed and expires.
    File {
        /// Link object.
        file: FileLink,
    },
    /// Any other reference kind, e.g. a pending upload. Has no URL.
    #[serde(other)]
    Unsupported,
}

impl FileRef {
    /// URL of the referenced file, regardless of where it is hosted.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::External { external: link } | Self::File { file: link } => &link.url,
            Self::Unsupported => "",
        }
    }
}

/// The link part of a file reference.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileLink {
    /// File URL.
    #[serde(default)]
    pub url: String,
}

/// A date or date range.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DateValue {
    /// Either `YYYY-MM-DD` or an RFC 3339 datetime.
    #[serde(default)]
    pub start: Option<String>,
    /// End of the range, if any.
    #[serde(default)]
    pub end: Option<String>,
}

/// Response body of `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    /// Rows on this page of results, decoded one at a time by the caller
    /// so a single bad row cannot fail the page.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    /// Whether another page of results exists.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Request body of `POST /databases/{id}/query`.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// Sort order, applied by the store.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    /// Cursor returned by the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    /// Maximum rows per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u8>,
}

impl QueryRequest {
    /// Query sorted ascending by a single property.
    #[must_use]
    pub fn sorted_by(property: &str) -> Self {
        Self {
            sorts: vec![Sort {
                property: property.to_owned(),
                direction: Direction::Ascending,
            }],
            ..Self::default()
        }
    }
}

/// A property sort.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Sort {
    /// Property name to sort by.
    pub property: String,
    /// Sort direction.
    pub direction: Direction,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// A property value sent when creating a page.
///
/// Serializes externally tagged, e.g. `{"title": [...]}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// Title column value.
    Title(Vec<TextInput>),
    /// Rich text column value.
    RichText(Vec<TextInput>),
    /// Date column value.
    Date(DateInput),
}

impl PropertyValue {
    /// A title holding a single plain text segment.
    #[must_use]
    pub fn title(content: &str) -> Self {
        Self::Title(vec![TextInput::plain(content)])
    }

    /// A rich text value holding a single plain text segment.
    #[must_use]
    pub fn rich_text(content: &str) -> Self {
        Self::RichText(vec![TextInput::plain(content)])
    }

    /// A single-day date value.
    #[must_use]
    pub fn date(start: &str) -> Self {
        Self::Date(DateInput {
            start: start.to_owned(),
        })
    }
}

/// A text segment sent to the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextInput {
    /// Text body.
    pub text: TextContent,
}

impl TextInput {
    /// Unannotated text.
    #[must_use]
    pub fn plain(content: &str) -> Self {
        Self {
            text: TextContent {
                content: content.to_owned(),
            },
        }
    }
}

/// Text body of a segment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextContent {
    /// The text.
    pub content: String,
}

/// Start of a date value sent to the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateInput {
    /// `YYYY-MM-DD`.
    pub start: String,
}

/// Property values for a new page, keyed by property name.
pub type Properties = HashMap<String, PropertyValue>;

/// Request body of `POST /pages`.
#[derive(Debug, Serialize)]
pub struct CreatePageRequest<'props> {
    /// Database the page is created in.
    pub parent: Parent,
    /// Initial property values.
    pub properties: &'props Properties,
}

/// Parent of a new page.
#[derive(Debug, Serialize)]
pub struct Parent {
    /// Id of the parent database.
    pub database_id: String,
}

/// Response body of `GET /databases/{id}`, reduced to the schema.
#[derive(Debug, Deserialize)]
pub struct DatabaseSchema {
    /// Database id.
    pub id: String,
    /// Column definitions keyed by name.
    #[serde(default)]
    pub properties: HashMap<String, PropertySchema>,
}

/// A column definition.
#[derive(Debug, Deserialize)]
pub struct PropertySchema {
    /// Kind of the column, e.g. `title` or `rich_text`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error body returned by the Notion API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Machine readable code, e.g. `object_not_found`.
    #[serde(default)]
    pub code: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}
