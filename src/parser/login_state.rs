use rulate_scraping_utils::selector;
use scraper::Html;

/// Whether the page still offers the login form, i.e. the session is anonymous.
pub fn shows_login_form(html: &Html) -> bool {
    html.select(selector!(r#"input[name="login[pass]"]"#))
        .next()
        .is_some()
}
