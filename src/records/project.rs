//! Portfolio projects.
use serde::{Deserialize, Serialize};

use super::Fields;
use crate::notion::types::Page;

/// Title property the projects listing is sorted by.
pub const NAME_PROPERTY: &str = "Name";

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Store-assigned id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Technologies used, in store order.
    pub tech: Vec<String>,
    /// Battle stats shown on the project card.
    pub stats: Stats,
    /// Project URL.
    pub link: String,
    /// Cover image URL.
    pub image: String,
}

/// Card stats.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    /// Complexity.
    pub atk: i64,
    /// Maintenance.
    pub def: i64,
}

impl From<&Page> for Project {
    fn from(page: &Page) -> Self {
        let fields = Fields::new(page);
        // `Image` may be configured as a URL column or as a files column.
        let mut image = fields.url("Image");
        if image.is_empty() {
            image = fields.first_file_url("Image");
        }
        Self {
            id: page.id.clone(),
            name: fields.title(NAME_PROPERTY),
            description: fields.rich_text("Description"),
            tech: fields.multi_select("Tech"),
            stats: Stats {
                atk: fields.integer("ATK"),
                def: fields.integer("DEF"),
            },
            link: fields.url("Link"),
            image,
        }
    }
}
