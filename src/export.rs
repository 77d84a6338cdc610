use std::path::Path;

use anyhow::Context;
use rulate_scraping_utils::fs_json_util::write_json_pretty;

use crate::schema::BookmarkRecord;

const INDENT: &[u8] = b"    ";

/// Writes the records as a JSON array, replacing whatever was at `path`.
pub fn save_to_json(records: &[BookmarkRecord], path: &Path) -> anyhow::Result<()> {
    write_json_pretty(path, records, INDENT)
        .with_context(|| format!("While writing bookmarks to {path:?}"))
}
