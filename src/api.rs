use log::{debug, info, warn};
use reqwest::StatusCode;
use rulate_scraping_utils::credentials::{Credentials, Login, Password};
use scraper::Html;
use serde::Serialize;

use crate::{
    config::Config,
    parser::{bookmarks, login_state::shows_login_form},
    schema::BookmarkRecord,
};

/// Result of submitting the login form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthOutcome {
    /// The site accepted the credentials and no longer offers the login form.
    Authenticated,
    /// The site answered 403.
    Rejected,
    /// Neither of the above: an unexpected status,
    /// or a successful response that still shows the login form.
    Unknown(StatusCode),
}

/// HTTP session against the site. Cookies set by the login response
/// are kept in the client and sent with every later request.
pub struct RulateClient<'c> {
    reqwest: reqwest::Client,
    config: &'c Config,
}

impl<'c> RulateClient<'c> {
    pub fn new(config: &'c Config) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .connection_verbose(true);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            reqwest: builder.build()?,
            config,
        })
    }

    pub async fn login(&self, credentials: &Credentials) -> anyhow::Result<AuthOutcome> {
        info!("Trying to log in as {}.", credentials.login);
        let response = self
            .reqwest
            .post(self.config.login_url())
            .form(&LoginForm::new(credentials))
            .send()
            .await?;
        let status = response.status();
        debug!("Login answered {status:?} at {}", response.url());
        if status == StatusCode::FORBIDDEN {
            return Ok(AuthOutcome::Rejected);
        }
        if !status.is_success() {
            return Ok(AuthOutcome::Unknown(status));
        }
        let html = Html::parse_document(&response.text().await?);
        if shows_login_form(&html) {
            Ok(AuthOutcome::Unknown(status))
        } else {
            Ok(AuthOutcome::Authenticated)
        }
    }

    /// Fetches the bookmarks listing of every category as raw HTML.
    pub async fn fetch_bookmarks_page(&self) -> anyhow::Result<String> {
        let url = self.config.bookmarks_url()?;
        let response = self
            .reqwest
            .post(url)
            .form(&BookmarksFilter::ALL)
            .send()
            .await?;
        if !response.status().is_success() {
            warn!("Bookmarks page answered {:?}", response.status());
        }
        Ok(response.text().await?)
    }

    pub async fn download_bookmarks(&self) -> anyhow::Result<Vec<BookmarkRecord>> {
        let page = self.fetch_bookmarks_page().await?;
        let records = bookmarks::parse(&page, &self.config.origin());
        debug!("Parsed {} bookmark rows", records.len());
        Ok(records)
    }
}

#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    #[serde(rename = "login[login]")]
    login: &'a Login,
    #[serde(rename = "login[pass]")]
    password: &'a Password,
}
impl<'a> LoginForm<'a> {
    fn new(credentials: &'a Credentials) -> Self {
        Self {
            login: &credentials.login,
            password: &credentials.password,
        }
    }
}

#[derive(Debug, Serialize)]
struct BookmarksFilter {
    #[serde(rename = "type")]
    kind: &'static str,
}
impl BookmarksFilter {
    /// `-1` selects every category.
    const ALL: Self = Self { kind: "-1" };
}
