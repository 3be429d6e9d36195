//! Zenn: `GET /api/articles?username={user}&order=latest`.
//!
//! The list lives under `articles`; some responses use `items` instead.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::http::{decode_entry, endpoint, entries, get_json};
use super::{Article, FetchError, Platform, MAX_ARTICLES};

pub const DEFAULT_BASE_URL: &str = "https://zenn.dev";

/// Article paths are relative to the public site, not the API host.
const LINK_BASE: &str = "https://zenn.dev";

#[derive(Deserialize)]
struct ZennResponse {
    #[serde(default)]
    articles: Option<Value>,
    #[serde(default)]
    items: Option<Value>,
}

impl ZennResponse {
    /// `items` is only consulted when `articles` is absent or `null`.
    fn into_entries(self) -> Result<Vec<Value>, FetchError> {
        entries(Platform::Zenn, self.articles.or(self.items))
    }
}

#[derive(Deserialize)]
struct ZennItem {
    title: String,
    path: String,
}

impl ZennItem {
    fn into_article(self) -> Article {
        let url = if self.path.starts_with('/') {
            format!("{}{}", LINK_BASE, self.path)
        } else {
            format!("{}/{}", LINK_BASE, self.path)
        };
        Article::new(self.title, url)
    }
}

pub struct ZennFetcher {
    client: Client,
    base_url: String,
}

impl ZennFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_url(&self, username: &str) -> Result<Url, FetchError> {
        let mut url = endpoint(Platform::Zenn, &self.base_url, &["api", "articles"])?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("order", "latest");
        Ok(url)
    }

    pub async fn fetch(&self, username: &str) -> Result<Vec<Article>, FetchError> {
        let response: ZennResponse =
            get_json(&self.client, Platform::Zenn, self.request_url(username)?).await?;

        let articles = response
            .into_entries()?
            .into_iter()
            .take(MAX_ARTICLES)
            .map(|entry| decode_entry(Platform::Zenn, entry).map(ZennItem::into_article))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(platform = "zenn", count = articles.len(), "Fetched articles");
        Ok(articles)
    }
}
