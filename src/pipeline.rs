use getset::{CopyGetters, Getters};
use log::{error, info, warn};
use rulate_scraping_utils::credentials::Credentials;

use crate::{
    api::{AuthOutcome, RulateClient},
    config::Config,
    database::save_to_db,
    export::save_to_json,
    schema::BookmarkRecord,
};

#[derive(Debug, Getters, CopyGetters)]
pub struct RunReport {
    #[getset(get_copy = "pub")]
    auth: AuthOutcome,
    #[getset(get = "pub")]
    records: Vec<BookmarkRecord>,
    #[getset(get_copy = "pub")]
    json_saved: bool,
    #[getset(get_copy = "pub")]
    db_saved: bool,
}

/// Logs in, downloads the bookmarks and writes them to both sinks.
///
/// A rejected login or an empty bookmarks table ends the run early
/// without touching either output. A database failure is reported
/// and swallowed; the JSON file written before it stays in place.
pub async fn run(config: &Config, credentials: &Credentials) -> anyhow::Result<RunReport> {
    println!("Starting to parse...");
    let client = RulateClient::new(config)?;
    let auth = client.login(credentials).await?;
    let records = match auth {
        AuthOutcome::Rejected => {
            println!("Authorization failed.");
            vec![]
        }
        AuthOutcome::Unknown(status) => {
            warn!("Could not confirm the login (server answered {status}).  Trying anyway.");
            client.download_bookmarks().await?
        }
        AuthOutcome::Authenticated => {
            info!("Successfully logged in.");
            client.download_bookmarks().await?
        }
    };

    let mut report = RunReport {
        auth,
        records,
        json_saved: false,
        db_saved: false,
    };
    if report.records.is_empty() {
        println!("No data to save.");
        return Ok(report);
    }
    println!("Received {} records.", report.records.len());

    save_to_json(&report.records, &config.json_path)?;
    report.json_saved = true;
    println!("Data saved to file: {}", config.json_path.display());

    match save_to_db(
        &report.records,
        &config.db_path,
        &config.table_name,
        config.db_write_mode,
    ) {
        Ok(count) => {
            report.db_saved = true;
            info!(
                "Wrote {count} rows to table {} ({} mode)",
                config.table_name, config.db_write_mode
            );
            println!("Data saved to database: {}", config.db_path.display());
        }
        Err(e) => {
            error!("Database error: {e}");
            println!("Database error: {e}");
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rulate_scraping_utils::{credentials::Credentials, fs_json_util::read_json};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::run;
    use crate::{api::AuthOutcome, config::Config, schema::BookmarkRecord};

    const BOOKMARKS_PAGE: &str = r#"<html><body><table><tbody>
<tr>
  <td><img src="/img/42.jpg"></td>
  <td>
    <a rel="tooltip" href="/book/42" title="A test description">Test Novel</a>
    <span class="type-label">Novel</span>
    <p class="note">3 new chapters</p>
    <p class="note"><a href="/book/42/5">Continue reading</a>Chapter 5</p>
  </td>
</tr>
<tr><td><p class="note">1 new chapter</p></td></tr>
</tbody></table></body></html>"#;

    fn credentials() -> Credentials {
        Credentials::builder()
            .login("reader".to_owned().into())
            .password("secret".to_owned().into())
            .build()
    }

    fn config(server: &MockServer, dir: &Path) -> Config {
        Config::builder()
            .base_url(server.uri().parse().unwrap())
            .json_path(dir.join("bookmarks_rulate.json"))
            .db_path(dir.join("database.db"))
            .build()
    }

    async fn server(login: ResponseTemplate, bookmarks: &str, bookmark_hits: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(login)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bookmarks"))
            .respond_with(ResponseTemplate::new(200).set_body_string(bookmarks))
            .expect(bookmark_hits)
            .mount(&server)
            .await;
        server
    }

    fn logged_in() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(r#"<a href="/logout">Log out</a>"#)
    }

    #[tokio::test]
    async fn full_run_writes_both_sinks() {
        let server = server(logged_in(), BOOKMARKS_PAGE, 1).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config(&server, dir.path());

        let report = run(&config, &credentials()).await.unwrap();
        assert_eq!(report.auth(), AuthOutcome::Authenticated);
        assert!(report.json_saved());
        assert!(report.db_saved());

        let saved: Vec<BookmarkRecord> = read_json(&config.json_path).unwrap();
        assert_eq!(&saved, report.records());
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].link, format!("{}/book/42", server.uri()));
        assert_eq!(saved[0].opened_chapters, "Chapter 5");
        assert_eq!(saved[1].title, "No title");

        let conn = rusqlite::Connection::open(&config.db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM rulate", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn rejected_login_skips_everything() {
        let server = server(ResponseTemplate::new(403), BOOKMARKS_PAGE, 0).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config(&server, dir.path());

        let report = run(&config, &credentials()).await.unwrap();
        assert_eq!(report.auth(), AuthOutcome::Rejected);
        assert!(report.records().is_empty());
        assert!(!report.json_saved());
        assert!(!report.db_saved());
        assert!(!config.json_path.exists());
        assert!(!config.db_path.exists());
    }

    #[tokio::test]
    async fn unconfirmed_login_still_fetches() {
        let login_again = ResponseTemplate::new(200)
            .set_body_string(r#"<form><input name="login[pass]"></form>"#);
        let server = server(login_again, BOOKMARKS_PAGE, 1).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config(&server, dir.path());

        let report = run(&config, &credentials()).await.unwrap();
        assert!(matches!(report.auth(), AuthOutcome::Unknown(_)));
        assert_eq!(report.records().len(), 2);
    }

    #[tokio::test]
    async fn empty_table_writes_nothing() {
        let page = "<html><body><table><tbody></tbody></table></body></html>";
        let server = server(logged_in(), page, 1).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config(&server, dir.path());

        let report = run(&config, &credentials()).await.unwrap();
        assert!(report.records().is_empty());
        assert!(!config.json_path.exists());
        assert!(!config.db_path.exists());
    }

    #[tokio::test]
    async fn table_without_tbody_writes_nothing() {
        let page = r#"<html><body><table>
<tr><td><a rel="tooltip" href="/login">Sign in</a></td></tr>
</table></body></html>"#;
        let server = server(logged_in(), page, 1).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config(&server, dir.path());

        let report = run(&config, &credentials()).await.unwrap();
        assert!(report.records().is_empty());
        assert!(!report.json_saved());
        assert!(!config.json_path.exists());
        assert!(!config.db_path.exists());
    }

    #[tokio::test]
    async fn database_failure_keeps_json() {
        let server = server(logged_in(), BOOKMARKS_PAGE, 1).await;
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: dir.path().to_owned(),
            ..config(&server, dir.path())
        };

        let report = run(&config, &credentials()).await.unwrap();
        assert!(report.json_saved());
        assert!(!report.db_saved());
        let saved: Vec<BookmarkRecord> = read_json(&config.json_path).unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[tokio::test]
    async fn unreachable_site_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .base_url("http://127.0.0.1:1/".parse().unwrap())
            .json_path(dir.path().join("out.json"))
            .request_timeout_secs(Some(5))
            .build();
        assert!(run(&config, &credentials()).await.is_err());
        assert!(!config.json_path.exists());
    }
}
