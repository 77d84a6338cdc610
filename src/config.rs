use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use typed_builder::TypedBuilder;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://tl.rulate.ru/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Everything the pipeline would otherwise hard-code.
///
/// `Config::default()` reproduces the fixed constants of the tool;
/// a TOML file may override any subset of the keys.
#[derive(Clone, Debug, TypedBuilder, Deserialize)]
#[serde(default)]
pub struct Config {
    #[builder(default = default_base_url())]
    pub base_url: Url,
    #[builder(default = "bookmarks".to_owned(), setter(into))]
    pub bookmarks_path: String,
    #[builder(default = DEFAULT_USER_AGENT.to_owned(), setter(into))]
    pub user_agent: String,
    #[builder(default = PathBuf::from("bookmarks_rulate.json"), setter(into))]
    pub json_path: PathBuf,
    #[builder(default = PathBuf::from("database.db"), setter(into))]
    pub db_path: PathBuf,
    #[builder(default = TableName::rulate())]
    pub table_name: TableName,
    #[builder(default)]
    pub db_write_mode: DbWriteMode,
    #[builder(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Scheme, host and port of the site without a trailing slash,
    /// e.g. `https://tl.rulate.ru`. Relative `href`s are appended to it.
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }

    pub fn login_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/");
        url
    }

    pub fn bookmarks_url(&self) -> Result<Url, url::ParseError> {
        self.login_url().join(&self.bookmarks_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base url is valid")
}

/// How rows from a previous run are treated by the database sink.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DbWriteMode {
    /// Delete every existing row, then insert the current records, in one transaction.
    #[default]
    Replace,
    /// `INSERT OR REPLACE` by 1-based position.
    /// Rows beyond the current record count survive from earlier runs.
    Upsert,
}

/// SQL identifier used as the table name.
///
/// It is spliced into statement text, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct TableName(String);

impl TableName {
    fn rulate() -> Self {
        Self("rulate".to_owned())
    }
}

impl TryFrom<String> for TableName {
    type Error = InvalidTableName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(Self(value))
        } else {
            Err(InvalidTableName(value))
        }
    }
}

impl FromStr for TableName {
    type Err = InvalidTableName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_owned().try_into()
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0:?} is not a valid table name")]
pub struct InvalidTableName(String);
