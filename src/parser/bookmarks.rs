use itertools::Itertools;
use rulate_scraping_utils::selector;
use scraper::{ElementRef, Html};

use crate::schema::{
    BookmarkRecord, NO_DESCRIPTION, NO_NEW_CHAPTERS, NO_OPENED_CHAPTERS, NO_TITLE, NO_TYPE,
};

/// Link text of the "continue reading" button inside the opened-chapters note,
/// as rendered by the site and by its English localization.
const CONTINUE_READING: [&str; 2] = ["Продолжить чтение", "Continue reading"];

/// Parses every row of the first `<tbody>` of the bookmarks page.
///
/// A page whose markup has no `<tbody>` tag yields no records, even if it
/// contains a table: the HTML parser would otherwise imply one.
/// Missing markup inside a row never fails; the field falls back instead.
pub fn parse(page: &str, origin: &str) -> Vec<BookmarkRecord> {
    if !has_tbody_tag(page) {
        return vec![];
    }
    let html = Html::parse_document(page);
    let Some(tbody) = html.select(selector!("tbody")).next() else {
        return vec![];
    };
    tbody
        .select(selector!("tr"))
        .map(|row| parse_row(row, origin))
        .collect()
}

pub fn parse_row(row: ElementRef, origin: &str) -> BookmarkRecord {
    let anchor = row.select(selector!(r#"a[rel~="tooltip"]"#)).next();
    let title = anchor.map_or_else(|| NO_TITLE.to_owned(), trimmed_text);
    let link = anchor
        .and_then(|a| a.attr("href"))
        .map_or_else(String::new, |href| format!("{origin}{href}"));
    let description = anchor
        .and_then(|a| a.attr("title"))
        .map_or_else(|| NO_DESCRIPTION.to_owned(), str::to_owned);

    let mut notes = row.select(selector!("p.note")).map(stripped_text);
    let new_chapters = notes
        .next()
        .unwrap_or_else(|| NO_NEW_CHAPTERS.to_owned());
    let opened_chapters = notes
        .next()
        .map_or_else(|| NO_OPENED_CHAPTERS.to_owned(), remove_continue_reading);

    let type_label = row
        .select(selector!(".type-label"))
        .next()
        .map_or_else(|| NO_TYPE.to_owned(), trimmed_text);
    let image_path = row
        .select(selector!("img"))
        .next()
        .and_then(|img| img.attr("src"))
        .map_or_else(String::new, |src| format!("{origin}{src}"));

    BookmarkRecord {
        title,
        link,
        description,
        new_chapters,
        opened_chapters,
        type_label,
        image_path,
    }
}

fn has_tbody_tag(page: &str) -> bool {
    page.to_ascii_lowercase().contains("<tbody")
}

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Every text node trimmed on its own, empty ones dropped, the rest glued together.
fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join("")
}

fn remove_continue_reading(text: String) -> String {
    CONTINUE_READING
        .iter()
        .fold(text, |text, phrase| text.replace(phrase, ""))
        .trim()
        .to_owned()
}
