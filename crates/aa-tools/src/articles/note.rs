//! note: `GET /api/v3/notes?username={user}`.
//!
//! The list lives under `data` (older responses use `notes`). Links are built
//! from the username and each note's `key`, or its `id` when there is no key.
//! Notes with neither are skipped instead of failing the whole request.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::http::{decode_entry, endpoint, entries, get_json};
use super::{Article, FetchError, Platform, MAX_ARTICLES};

pub const DEFAULT_BASE_URL: &str = "https://note.com";

const LINK_BASE: &str = "https://note.com";

#[derive(Deserialize)]
struct NoteResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    notes: Option<Value>,
}

impl NoteResponse {
    /// `notes` is only consulted when `data` is absent or `null`.
    fn into_entries(self) -> Result<Vec<Value>, FetchError> {
        entries(Platform::Note, self.data.or(self.notes))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NoteId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
struct NoteItem {
    name: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    id: Option<NoteId>,
}

impl NoteItem {
    fn slug(&self) -> Option<String> {
        if let Some(key) = self.key.as_deref().filter(|k| !k.is_empty()) {
            return Some(key.to_string());
        }
        match &self.id {
            Some(NoteId::Text(id)) if !id.is_empty() => Some(id.clone()),
            Some(NoteId::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    /// `None` for notes that cannot be linked to.
    fn into_article(self, username: &str) -> Result<Option<Article>, FetchError> {
        let Some(slug) = self.slug() else {
            debug!(platform = "note", title = %self.name, "Skipping note without key or id");
            return Ok(None);
        };
        let url = endpoint(Platform::Note, LINK_BASE, &[username, "n", slug.as_str()])?;
        Ok(Some(Article::new(self.name, url.to_string())))
    }
}

pub struct NoteFetcher {
    client: Client,
    base_url: String,
}

impl NoteFetcher {
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
        let mut url = endpoint(Platform::Note, &self.base_url, &["api", "v3", "notes"])?;
        url.query_pairs_mut().append_pair("username", username);
        Ok(url)
    }

    pub async fn fetch(&self, username: &str) -> Result<Vec<Article>, FetchError> {
        let response: NoteResponse =
            get_json(&self.client, Platform::Note, self.request_url(username)?).await?;

        // Entries are decoded lazily: nothing past the last kept note is read.
        let articles = response
            .into_entries()?
            .into_iter()
            .filter_map(|entry| {
                decode_entry::<NoteItem>(Platform::Note, entry)
                    .and_then(|item| item.into_article(username))
                    .transpose()
            })
            .take(MAX_ARTICLES)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(platform = "note", count = articles.len(), "Fetched articles");
        Ok(articles)
    }
}
