use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_NEW_CHAPTERS: &str = "No new chapters";
pub const NO_OPENED_CHAPTERS: &str = "No opened chapters";
pub const NO_TYPE: &str = "No type";

/// One row of the bookmarks table.
///
/// Field order is significant: it is the key order of the JSON export
/// and the column order of the database table.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub title: String,
    pub link: String,
    pub description: String,
    pub new_chapters: String,
    pub opened_chapters: String,
    pub type_label: String,
    pub image_path: String,
}

impl Default for BookmarkRecord {
    /// A record made entirely of fallback values.
    fn default() -> Self {
        Self {
            title: NO_TITLE.to_owned(),
            link: String::new(),
            description: NO_DESCRIPTION.to_owned(),
            new_chapters: NO_NEW_CHAPTERS.to_owned(),
            opened_chapters: NO_OPENED_CHAPTERS.to_owned(),
            type_label: NO_TYPE.to_owned(),
            image_path: String::new(),
        }
    }
}
